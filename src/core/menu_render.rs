use crate::core::menu_parser::PRICE_MARKER;
use crate::domain::model::Menu;
use rust_decimal::Decimal;

/// `R$` amounts without thousands grouping, so the price pattern matches them again.
fn price_text(value: Decimal) -> String {
    let mut value = value;
    if value.scale() < 2 {
        value.rescale(2);
    }
    value.to_string().replace('.', ",")
}

/// Lines of the canonical menu document, in the layout `parse_menu` reads back.
pub fn menu_lines(menu: &Menu) -> Vec<String> {
    let mut lines = vec![menu.title().to_string()];

    for section in menu.sections() {
        lines.push(format!("{}:", section.title));
        for item in &section.items {
            lines.push(item.name.clone());
            if let Some(description) = &item.description {
                lines.push(description.clone());
            }
        }
    }

    lines.push(PRICE_MARKER.to_string());
    lines.push(format!(
        "R$ {} (sem bebidas alcoólicas)",
        price_text(menu.price_without_alcohol())
    ));
    lines.push(format!(
        "R$ {} (com bebidas alcoólicas)",
        price_text(menu.price_with_alcohol())
    ));
    lines
}

pub fn render_menu_text(menu: &Menu) -> String {
    menu_lines(menu).join("\n")
}
