//! Projects an event into the flat fields a service-order template expects.

use crate::core::menu_parser::is_caps_invariant;
use crate::domain::model::{Event, MenuItem, MenuSection};
use crate::utils::format::{
    format_brl_number, format_long_date_pt_br, format_percent, format_plain_decimal,
};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const EMPTY_FIELD: &str = "-";
const ITEM_SEPARATOR: &str = " - ";

pub const SERVICE_ORDER_KEYS: [&str; 13] = [
    "OS",
    "EVENTO",
    "PAX",
    "CONTRATANTE",
    "DATA",
    "HORARIO",
    "OPERACAO",
    "SOLICITACAO",
    "PAGAMENTO",
    "TOTAL",
    "SERVICO",
    "COMIDAS",
    "RESPONSAVEL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOrderOptions {
    /// Offset used to render the event date, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl ServiceOrderOptions {
    // 營運時區 America/Sao_Paulo
    pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for ServiceOrderOptions {
    fn default() -> Self {
        Self {
            utc_offset_minutes: Self::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => EMPTY_FIELD.to_string(),
    }
}

fn flatten_item(item: &MenuItem) -> String {
    match &item.description {
        Some(description) if !description.is_empty() => {
            format!("{}{}{}", item.name, ITEM_SEPARATOR, description)
        }
        _ => item.name.clone(),
    }
}

/// Renders sections as `"<title>:\n<name> - <description>"` blocks separated by a blank line.
pub fn flatten_menu_sections(sections: &[MenuSection]) -> String {
    sections
        .iter()
        .map(|section| {
            let items: Vec<String> = section.items.iter().map(flatten_item).collect();
            format!("{}:\n{}", section.title, items.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Splits a flattened food line into name and description.
///
/// Names may contain the separator themselves, so the split taken is the last
/// one with a caps-invariant name and a description that is not. A line with
/// no caps-invariant prefix is kept whole as the name.
fn unflatten_food_item(line: &str) -> MenuItem {
    let splits: Vec<(&str, &str)> = line
        .match_indices(ITEM_SEPARATOR)
        .map(|(at, _)| (&line[..at], &line[at + ITEM_SEPARATOR.len()..]))
        .filter(|(name, _)| is_caps_invariant(name))
        .collect();

    let chosen = splits
        .iter()
        .rev()
        .find(|(_, description)| !is_caps_invariant(description))
        .or_else(|| splits.first());

    match chosen {
        Some((name, description)) => MenuItem::food(*name, *description),
        None => MenuItem {
            name: line.to_string(),
            description: None,
        },
    }
}

/// Inverse of [`flatten_menu_sections`] for menus built by `parse_menu`.
pub fn unflatten_menu_sections(text: &str) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(title) = line.strip_suffix(':') {
            sections.push(MenuSection::new(title));
            continue;
        }

        let Some(section) = sections.last_mut() else {
            continue;
        };
        // 飲料區的品項只有名稱，名稱本身可能含有分隔符
        let item = if section.is_beverage_section() {
            MenuItem::beverage(line)
        } else {
            unflatten_food_item(line)
        };
        section.items.push(item);
    }

    sections
}

fn payment_line(event: &Event) -> String {
    format!(
        "{}+serviço= {}. Por pessoa.",
        format_brl_number(event.price),
        format_brl_number(event.pricing.price_with_service_fee)
    )
}

fn total_line(event: &Event) -> String {
    let discount = if event.discount.is_zero() {
        String::new()
    } else {
        format_percent(event.discount)
    };

    format!(
        "{} x {} = {}\nPagamento mínimo: {} - {} = {}.",
        format_plain_decimal(event.pricing.price_with_service_fee),
        event.participants_quantity,
        format_brl_number(event.pricing.total_with_service_fee),
        format_brl_number(event.pricing.total_with_service_fee),
        discount,
        format_brl_number(event.pricing.total_with_service_fee_and_discount)
    )
}

pub fn map_event_to_service_order_fields(
    event: &Event,
    options: &ServiceOrderOptions,
) -> BTreeMap<String, String> {
    let local_date = event.date.with_timezone(&options.offset());
    let restaurant = event.location.restaurant_name();

    let fields = [
        ("OS", local_date.format("%d-%m-%y").to_string()),
        ("EVENTO", or_placeholder(event.title.as_deref())),
        ("PAX", event.participants_quantity.to_string()),
        ("CONTRATANTE", restaurant.to_string()),
        ("DATA", format_long_date_pt_br(&local_date)),
        ("HORARIO", local_date.format("%H:%M").to_string()),
        (
            "OPERACAO",
            format!("Restaurante {}, {}", restaurant, event.location.name),
        ),
        ("SOLICITACAO", or_placeholder(event.description.as_deref())),
        ("PAGAMENTO", payment_line(event)),
        ("TOTAL", total_line(event)),
        ("SERVICO", EMPTY_FIELD.to_string()),
        ("COMIDAS", flatten_menu_sections(event.menu.sections())),
        ("RESPONSAVEL", or_placeholder(event.user.name.as_deref())),
    ];

    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// `ordem-servico-<last six id chars>.docx`
pub fn service_order_file_name(event: &Event) -> String {
    let chars: Vec<char> = event.id.chars().collect();
    let suffix: String = chars[chars.len().saturating_sub(6)..].iter().collect();
    format!("ordem-servico-{}.docx", suffix.to_lowercase())
}
