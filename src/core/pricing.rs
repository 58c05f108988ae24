//! Fee and discount arithmetic for event pricing.
//!
//! Each output is rounded once, on the final product of its own formula.
//! `total_with_service_fee` is *not* `round2(total) * (1 + fee)`.

use crate::domain::model::{PricingConfig, PricingInputs, PricingOutputs};
use crate::utils::validation::Validate;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid pricing input '{field}' = {value}: {reason}")]
    InvalidPricingInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl PricingError {
    fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        PricingError::InvalidPricingInput {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// Rounds to cents, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn check_rate(field: &'static str, rate: Decimal) -> Result<(), PricingError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(PricingError::invalid(field, rate, "rate must be between 0 and 1"));
    }
    Ok(())
}

fn check_amounts(unit_price: Decimal, participants_quantity: i64) -> Result<(), PricingError> {
    if unit_price < Decimal::ZERO {
        return Err(PricingError::invalid("unitPrice", unit_price, "must not be negative"));
    }
    if participants_quantity < 0 {
        return Err(PricingError::invalid(
            "participantsQuantity",
            participants_quantity,
            "must not be negative",
        ));
    }
    Ok(())
}

fn multiply(lhs: Decimal, rhs: Decimal) -> Result<Decimal, PricingError> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| PricingError::invalid("unitPrice", lhs, "amount is out of range"))
}

pub fn compute_pricing(
    unit_price: Decimal,
    participants_quantity: i64,
    config: &PricingConfig,
) -> Result<PricingOutputs, PricingError> {
    check_amounts(unit_price, participants_quantity)?;
    check_rate("serviceFeeRate", config.service_fee_rate)?;
    check_rate("discountRate", config.discount_rate)?;

    let fee_factor = Decimal::ONE + config.service_fee_rate;
    let discount_factor = Decimal::ONE - config.discount_rate;

    let gross = multiply(unit_price, Decimal::from(participants_quantity))?;
    let gross_with_fee = multiply(gross, fee_factor)?;
    let discounted = multiply(gross_with_fee, discount_factor)?;

    Ok(PricingOutputs {
        price_with_service_fee: round2(multiply(unit_price, fee_factor)?),
        total: round2(gross),
        total_with_service_fee: round2(gross_with_fee),
        total_with_service_fee_and_discount: round2(discounted),
    })
}

impl Validate for PricingInputs {
    fn validate(&self) -> crate::utils::error::Result<()> {
        check_amounts(self.unit_price, self.participants_quantity)?;
        Ok(())
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        check_rate("serviceFeeRate", self.service_fee_rate)?;
        check_rate("discountRate", self.discount_rate)?;
        Ok(())
    }
}
