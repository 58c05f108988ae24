use crate::core::menu_parser::MenuParseError;
use crate::core::pricing::{self, PricingError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    pub fn food(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }

    pub fn beverage(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl MenuSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// 標題含有 "bebida" 的區段視為飲料區，品項只有名稱
    pub fn is_beverage_section(&self) -> bool {
        self.title.to_lowercase().contains("bebida")
    }
}

/// A catering menu extracted from an uploaded document.
///
/// Once built the menu is never mutated; a new upload produces a new `Menu`
/// that replaces the previous one on the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    title: String,
    sections: Vec<MenuSection>,
    price_with_alcohol: Decimal,
    price_without_alcohol: Decimal,
}

impl Menu {
    pub fn new(
        title: impl Into<String>,
        sections: Vec<MenuSection>,
        price_without_alcohol: Decimal,
        price_with_alcohol: Decimal,
    ) -> std::result::Result<Self, MenuParseError> {
        if sections.is_empty() {
            return Err(MenuParseError::NoSections);
        }
        if price_with_alcohol <= Decimal::ZERO || price_without_alcohol <= Decimal::ZERO {
            return Err(MenuParseError::InvalidPrices);
        }

        Ok(Self {
            title: title.into(),
            sections,
            price_with_alcohol,
            price_without_alcohol,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    pub fn price_with_alcohol(&self) -> Decimal {
        self.price_with_alcohol
    }

    pub fn price_without_alcohol(&self) -> Decimal {
        self.price_without_alcohol
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Fee and discount rates applied by the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub service_fee_rate: Decimal,
    pub discount_rate: Decimal,
}

impl PricingConfig {
    pub const DEFAULT_SERVICE_FEE_RATE: Decimal = Decimal::from_parts(135, 0, 0, false, 3);
    pub const DEFAULT_DISCOUNT_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_rate: Self::DEFAULT_SERVICE_FEE_RATE,
            discount_rate: Self::DEFAULT_DISCOUNT_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInputs {
    pub unit_price: Decimal,
    pub participants_quantity: i64,
}

impl PricingInputs {
    pub fn new(unit_price: Decimal, participants_quantity: i64) -> Self {
        Self {
            unit_price,
            participants_quantity,
        }
    }

    pub fn compute(&self, config: &PricingConfig) -> std::result::Result<PricingOutputs, PricingError> {
        pricing::compute_pricing(self.unit_price, self.participants_quantity, config)
    }
}

/// Monetary fields derived from one `(unit price, participants)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOutputs {
    pub price_with_service_fee: Decimal,
    pub total: Decimal,
    pub total_with_service_fee: Decimal,
    pub total_with_service_fee_and_discount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Location>>,
}

impl Location {
    /// 有上層地點時取上層名稱（餐廳），否則取自身名稱
    pub fn restaurant_name(&self) -> &str {
        self.parent
            .as_deref()
            .map(|parent| parent.name.as_str())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A private-dining booking with its menu and derived pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub participants_quantity: i64,
    pub price: Decimal,
    pub service_fee: Decimal,
    pub discount: Decimal,
    #[serde(flatten)]
    pub pricing: PricingOutputs,
    pub location: Location,
    #[serde(default)]
    pub contractor: Option<Person>,
    pub user: User,
    pub menu: Menu,
    #[serde(default)]
    pub status: EventStatus,
}

impl Event {
    /// Re-derives every monetary field from a new price and participant count.
    ///
    /// Nothing is written unless the whole computation succeeds.
    pub fn reprice(
        &mut self,
        unit_price: Decimal,
        participants_quantity: i64,
        config: &PricingConfig,
    ) -> std::result::Result<(), PricingError> {
        let outputs = pricing::compute_pricing(unit_price, participants_quantity, config)?;

        self.price = pricing::round2(unit_price);
        self.participants_quantity = participants_quantity;
        self.service_fee = config.service_fee_rate;
        self.discount = config.discount_rate;
        self.pricing = outputs;
        Ok(())
    }

    /// Moves the event to `status`. Publishing a draft re-derives its pricing
    /// when the rates have changed since it was last priced.
    ///
    /// `price` is stored rounded, so a reprice can move totals by a cent
    /// relative to the unrounded unit price the event was created with.
    pub fn set_status(
        &mut self,
        status: EventStatus,
        config: &PricingConfig,
    ) -> std::result::Result<(), PricingError> {
        let rates_changed = self.service_fee != config.service_fee_rate
            || self.discount != config.discount_rate;
        if self.status == EventStatus::Draft && status == EventStatus::Published && rates_changed {
            self.reprice(self.price, self.participants_quantity, config)?;
        }
        self.status = status;
        Ok(())
    }

    pub fn replace_menu(&mut self, menu: Menu) {
        self.menu = menu;
    }
}

/// Raw text pulled out of one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportedMenu {
    pub source: String,
    pub menu: Menu,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub source: String,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub menus: Vec<ImportedMenu>,
    pub failures: Vec<ImportFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Txt,
    Docx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Txt => "txt",
            OutputFormat::Docx => "docx",
        }
    }
}
