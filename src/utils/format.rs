use chrono::{DateTime, Datelike, TimeZone};
use rust_decimal::Decimal;

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// pt-BR money notation without currency symbol: `1.234,56`
pub fn format_brl_number(value: Decimal) -> String {
    let rounded = crate::core::pricing::round2(value);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}{},{}", sign, grouped, fraction)
}

/// Shortest plain rendering, `56.50` becomes `56.5` and `500.00` becomes `500`
pub fn format_plain_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// `0.2` becomes `20%`
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", format_plain_decimal(rate * Decimal::ONE_HUNDRED))
}

/// `14 de março de 2025`
pub fn format_long_date_pt_br<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}
