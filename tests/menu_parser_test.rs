use menu_etl::core::menu_parser::{parse_menu, validate_menu_content, MenuParseError};
use menu_etl::core::menu_render::render_menu_text;
use menu_etl::domain::model::{MenuItem, MenuSection};
use proptest::prelude::*;
use rust_decimal::Decimal;

const SAMPLE_MENU: &str = "Menu Teste\nENTRADAS:\nBRUSCHETTA\nPão italiano com tomate\nBebidas:\nVinho tinto\nPreço por pessoa\nR$ 100,00\nR$ 150,00";

#[test]
fn test_parse_sample_menu() {
    let menu = parse_menu(SAMPLE_MENU).unwrap();

    assert_eq!(menu.title(), "Menu Teste");
    assert_eq!(
        menu.sections(),
        &[
            MenuSection {
                title: "ENTRADAS".to_string(),
                items: vec![MenuItem::food("BRUSCHETTA", "Pão italiano com tomate")],
            },
            MenuSection {
                title: "Bebidas".to_string(),
                items: vec![MenuItem::beverage("Vinho tinto")],
            },
        ]
    );
    assert_eq!(menu.price_without_alcohol(), Decimal::new(10000, 2));
    assert_eq!(menu.price_with_alcohol(), Decimal::new(15000, 2));
}

#[test]
fn test_missing_price_block() {
    let without_prices = "Menu Teste\nENTRADAS:\nBRUSCHETTA\nPão italiano com tomate\nBebidas:\nVinho tinto";

    assert_eq!(
        parse_menu(without_prices).unwrap_err(),
        MenuParseError::MissingPriceBlock
    );
}

#[test]
fn test_food_item_without_description_before_marker() {
    let content = "Menu Teste\nENTRADAS:\nBRUSCHETTA\nPão italiano com tomate\nCARPACCIO\nPreço por pessoa\nR$ 100,00\nR$ 150,00";

    assert_eq!(
        parse_menu(content).unwrap_err(),
        MenuParseError::MissingItemDescription("CARPACCIO".to_string())
    );
}

#[test]
fn test_food_item_followed_by_section_header() {
    let content = "Menu\nENTRADAS:\nBRUSCHETTA\nBebidas:\nÁgua\nPreço por pessoa\nR$ 10,00\nR$ 20,00";

    assert_eq!(
        parse_menu(content).unwrap_err(),
        MenuParseError::MissingItemDescription("BRUSCHETTA".to_string())
    );
}

#[test]
fn test_empty_content() {
    assert_eq!(parse_menu("").unwrap_err(), MenuParseError::EmptyContent);
    assert_eq!(parse_menu("  \n\n // \n").unwrap_err(), MenuParseError::EmptyContent);
}

#[test]
fn test_structure_checks_run_in_order() {
    assert_eq!(
        validate_menu_content("Menu\nBRUSCHETTA\nPreço por pessoa").unwrap_err(),
        MenuParseError::MissingSections
    );
    assert_eq!(
        validate_menu_content("Menu\nEntradas:\nsalada verde\nPreço por pessoa").unwrap_err(),
        MenuParseError::MissingItems
    );
    assert!(validate_menu_content(SAMPLE_MENU).is_ok());
}

#[test]
fn test_extraction_prefix_and_blank_lines_are_ignored() {
    let content = "// Jantar de Gala\n\n// PRATOS PRINCIPAIS:\n// RISOTO\n// Risoto de cogumelos\n\n// Bebidas:\n// Suco de laranja\n// Preço por pessoa\n// R$ 89,90\n// R$ 120,00\n";

    let menu = parse_menu(content).unwrap();
    assert_eq!(menu.title(), "Jantar de Gala");
    assert_eq!(menu.sections()[0].title, "PRATOS PRINCIPAIS");
    assert_eq!(
        menu.sections()[0].items,
        vec![MenuItem::food("RISOTO", "Risoto de cogumelos")]
    );
    assert_eq!(menu.sections()[1].items, vec![MenuItem::beverage("Suco de laranja")]);
    assert_eq!(menu.price_without_alcohol(), Decimal::new(8990, 2));
}

#[test]
fn test_beverage_section_keeps_every_line() {
    let content = "Menu\nCarta de bebidas:\nCAIPIRINHA\nVinho tinto\nÁgua com gás\nPreço por pessoa\nR$ 10,00\nR$ 20,00";

    let menu = parse_menu(content).unwrap();
    let names: Vec<&str> = menu.sections()[0]
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["CAIPIRINHA", "Vinho tinto", "Água com gás"]);
    assert!(menu.sections()[0].items.iter().all(|item| item.description.is_none()));
}

#[test]
fn test_lowercase_lines_in_food_sections_are_skipped() {
    let content = "Menu\nENTRADAS:\nservidas à mesa\nBRUSCHETTA\nPão italiano\nPreço por pessoa\nR$ 10,00\nR$ 20,00";

    let menu = parse_menu(content).unwrap();
    assert_eq!(menu.item_count(), 1);
    assert_eq!(menu.sections()[0].items[0].name, "BRUSCHETTA");
}

#[test]
fn test_invalid_and_missing_prices() {
    let bad_format = "Menu\nENTRADAS:\nSALADA\nFolhas\nPreço por pessoa\nR$ 100\nR$ 150,00";
    assert_eq!(
        parse_menu(bad_format).unwrap_err(),
        MenuParseError::InvalidPriceFormat {
            line: Some("R$ 100".to_string())
        }
    );

    let one_price = "Menu\nENTRADAS:\nSALADA\nFolhas\nPreço por pessoa\nR$ 100,00";
    assert_eq!(
        parse_menu(one_price).unwrap_err(),
        MenuParseError::InvalidPriceFormat { line: None }
    );

    let zero_price = "Menu\nENTRADAS:\nSALADA\nFolhas\nPreço por pessoa\nR$ 0,00\nR$ 150,00";
    assert_eq!(parse_menu(zero_price).unwrap_err(), MenuParseError::InvalidPrices);
}

#[test]
fn test_rendered_text_parses_back() {
    let content = "Menu Teste\nENTRADAS:\nBRUSCHETTA\nPão italiano com tomate\nCARPACCIO\nLâminas de filé\nBebidas:\nVinho tinto\nCerveja\nPreço por pessoa\nR$ 1234,50\nR$ 150,00";

    let menu = parse_menu(content).unwrap();
    let reparsed = parse_menu(&render_menu_text(&menu)).unwrap();

    assert_eq!(reparsed, menu);
}

#[test]
fn test_repeated_extraction_prefix_renders_back() {
    let content = "Menu\n// // Bebidas:\n// // VINHO\nPreço por pessoa\nR$ 10,00\nR$ 20,00";

    let menu = parse_menu(content).unwrap();
    assert_eq!(menu.sections()[0].items, vec![MenuItem::beverage("VINHO")]);
    assert_eq!(parse_menu(&render_menu_text(&menu)).unwrap(), menu);
}

fn food_name() -> impl Strategy<Value = String> {
    "[A-Z]{3,12}( - [A-Z]{2,8})?( [A-Z]{2,8})?"
}

fn description() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}( - [a-z]{2,8})?( [a-z]{2,8}){0,3}"
}

fn menu_text() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((food_name(), description()), 1..6),
        prop::collection::vec(description(), 0..4),
        1u32..100_000,
        1u32..100_000,
    )
        .prop_map(|(foods, drinks, without, with)| {
            let mut lines = vec!["Cardápio".to_string(), "PRATOS:".to_string()];
            for (name, desc) in foods {
                lines.push(name);
                lines.push(desc);
            }
            lines.push("Bebidas:".to_string());
            lines.extend(drinks);
            lines.push("Preço por pessoa".to_string());
            lines.push(format!("R$ {},{:02}", without / 100, without % 100));
            lines.push(format!("R$ {},{:02}", with / 100, with % 100));
            lines.join("\n")
        })
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(content in menu_text()) {
        let first = parse_menu(&content);
        let second = parse_menu(&content);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_generated_menus_parse_and_render_back(content in menu_text()) {
        let menu = parse_menu(&content).unwrap();
        prop_assert_eq!(parse_menu(&render_menu_text(&menu)).unwrap(), menu);
    }

    #[test]
    fn prop_arbitrary_text_never_panics(content in "\\PC{0,200}") {
        let _ = parse_menu(&content);
    }
}
