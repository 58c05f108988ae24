//! Turns the plain-text extraction of a menu document into a [`Menu`].
//!
//! Expected layout (blank lines are ignored):
//!
//! ```text
//! Menu Teste
//! ENTRADAS:
//! BRUSCHETTA
//! Pão italiano com tomate
//! Bebidas:
//! Vinho tinto
//! Preço por pessoa
//! R$ 100,00
//! R$ 150,00
//! ```
//!
//! The first line is the title. Lines ending in `:` open a section. In a
//! beverage section every line is an item; elsewhere a caps-invariant line is
//! a food item and the following line is its description. The two lines after
//! the price marker hold the price without alcohol and then with alcohol.

use crate::domain::model::{Menu, MenuItem, MenuSection};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

pub const PRICE_MARKER: &str = "Preço por pessoa";
const BEVERAGE_KEYWORD: &str = "bebida";

static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*(\d+,\d+)").expect("price pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuParseError {
    #[error("menu content is empty")]
    EmptyContent,

    #[error("menu has no section header (a line ending with ':')")]
    MissingSections,

    #[error("menu has no 'Preço por pessoa' price block")]
    MissingPriceBlock,

    #[error("menu has no food or beverage items")]
    MissingItems,

    #[error("missing description for food item: {0}")]
    MissingItemDescription(String),

    #[error("invalid price format{}, expected 'R$ XXX,XX'", price_context(.line))]
    InvalidPriceFormat { line: Option<String> },

    #[error("menu must have at least one section")]
    NoSections,

    #[error("invalid prices: prices with and without alcohol must be greater than 0")]
    InvalidPrices,
}

fn price_context(line: &Option<String>) -> String {
    match line {
        Some(line) => format!(" in line '{}'", line),
        None => " (prices without and with alcohol are both required)".to_string(),
    }
}

impl MenuParseError {
    pub fn kind(&self) -> &'static str {
        match self {
            MenuParseError::EmptyContent => "EmptyContent",
            MenuParseError::MissingSections => "MissingSections",
            MenuParseError::MissingPriceBlock => "MissingPriceBlock",
            MenuParseError::MissingItems => "MissingItems",
            MenuParseError::MissingItemDescription(_) => "MissingItemDescription",
            MenuParseError::InvalidPriceFormat { .. } => "InvalidPriceFormat",
            MenuParseError::NoSections => "NoSections",
            MenuParseError::InvalidPrices => "InvalidPrices",
        }
    }

    /// 上傳流程顯示給使用者的訊息（葡萄牙文）
    pub fn user_message(&self) -> String {
        match self {
            MenuParseError::EmptyContent => "O conteúdo do cardápio está vazio".to_string(),
            MenuParseError::MissingSections => {
                "O cardápio deve ter pelo menos uma seção (título terminando com dois pontos)"
                    .to_string()
            }
            MenuParseError::MissingPriceBlock => {
                "O cardápio deve ter informações de preço (Preço por pessoa)".to_string()
            }
            MenuParseError::MissingItems => "O cardápio deve ter pelo menos um item".to_string(),
            MenuParseError::MissingItemDescription(name) => {
                format!("Descrição ausente para o item: {}", name)
            }
            MenuParseError::InvalidPriceFormat { line: Some(line) } => {
                format!("Formato de preço inválido em '{}'. Formato esperado: R$ XXX,XX", line)
            }
            MenuParseError::InvalidPriceFormat { line: None } => {
                "Informações de preço ausentes. Informe os preços com e sem bebidas alcoólicas"
                    .to_string()
            }
            MenuParseError::NoSections => "O cardápio deve ter pelo menos uma seção".to_string(),
            MenuParseError::InvalidPrices => {
                "Preços inválidos: os preços com e sem bebidas alcoólicas devem ser maiores que zero"
                    .to_string()
            }
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            MenuParseError::EmptyContent => "Upload a document that contains the menu text",
            MenuParseError::MissingSections | MenuParseError::NoSections => {
                "Add section titles ending with ':' (for example 'ENTRADAS:')"
            }
            MenuParseError::MissingPriceBlock => {
                "Add a 'Preço por pessoa' line followed by the two prices"
            }
            MenuParseError::MissingItems => {
                "Write food item names in capitals or add a 'Bebidas:' section"
            }
            MenuParseError::MissingItemDescription(_) => {
                "Put a description line right after each capitalized food item"
            }
            MenuParseError::InvalidPriceFormat { .. } | MenuParseError::InvalidPrices => {
                "Write both prices as 'R$ 100,00', without alcohol first"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    SectionHeader(&'a str),
    PriceMarker,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    line: &'a str,
    kind: LineKind<'a>,
}

/// Trims the line and drops every leading `// ` artifact some extractions prepend.
fn clean_line(line: &str) -> &str {
    let mut cleaned = line.trim();
    while let Some(rest) = cleaned.strip_prefix("//") {
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            break;
        }
        cleaned = rest.trim();
    }
    cleaned
}

fn content_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Food item names are lines that uppercasing leaves unchanged.
pub fn is_caps_invariant(line: &str) -> bool {
    line == line.to_uppercase()
}

fn mentions_beverages(text: &str) -> bool {
    text.to_lowercase().contains(BEVERAGE_KEYWORD)
}

fn classify(line: &str) -> Token<'_> {
    // 價格標記優先於區段標題，"Preço por pessoa:" 仍是標記
    let kind = if line.contains(PRICE_MARKER) {
        LineKind::PriceMarker
    } else if let Some(title) = line.strip_suffix(':') {
        LineKind::SectionHeader(title.trim_end())
    } else {
        LineKind::Text
    };
    Token { line, kind }
}

fn check_structure(lines: &[&str]) -> Result<(), MenuParseError> {
    if lines.is_empty() {
        return Err(MenuParseError::EmptyContent);
    }
    if !lines.iter().any(|line| line.ends_with(':')) {
        return Err(MenuParseError::MissingSections);
    }
    if !lines.iter().any(|line| line.contains(PRICE_MARKER)) {
        return Err(MenuParseError::MissingPriceBlock);
    }

    let has_food = lines.iter().any(|line| is_caps_invariant(line));
    let has_beverages = lines.iter().any(|line| mentions_beverages(line));
    if !has_food && !has_beverages {
        return Err(MenuParseError::MissingItems);
    }

    Ok(())
}

/// Runs the structural pre-checks without building a menu.
pub fn validate_menu_content(content: &str) -> Result<(), MenuParseError> {
    check_structure(&content_lines(content))
}

fn parse_price(line: &str) -> Result<Decimal, MenuParseError> {
    PRICE_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|amount| Decimal::from_str(&amount.as_str().replace(',', ".")).ok())
        .ok_or_else(|| MenuParseError::InvalidPriceFormat {
            line: Some(line.to_string()),
        })
}

/// Returns `(without alcohol, with alcohol)` from the lines after the marker.
fn extract_prices(lines: &[&str]) -> Result<(Decimal, Decimal), MenuParseError> {
    let [without_alcohol, with_alcohol, ..] = lines else {
        return Err(MenuParseError::InvalidPriceFormat { line: None });
    };
    Ok((parse_price(without_alcohol)?, parse_price(with_alcohol)?))
}

pub fn parse_menu(content: &str) -> Result<Menu, MenuParseError> {
    let lines = content_lines(content);
    check_structure(&lines)?;

    let Some((title, body)) = lines.split_first() else {
        return Err(MenuParseError::EmptyContent);
    };

    let tokens: Vec<Token<'_>> = body.iter().map(|line| classify(line)).collect();

    let mut sections = Vec::new();
    let mut current: Option<MenuSection> = None;
    let mut prices = None;
    let mut rest = tokens.iter();

    while let Some(token) = rest.next() {
        match token.kind {
            LineKind::PriceMarker => {
                let remaining: Vec<&str> = rest.as_slice().iter().map(|t| t.line).collect();
                prices = Some(extract_prices(&remaining)?);
                break;
            }
            LineKind::SectionHeader(section_title) => {
                if let Some(done) = current.replace(MenuSection::new(section_title)) {
                    sections.push(done);
                }
            }
            LineKind::Text => {
                // 第一個區段之前的文字不屬於任何區段
                let Some(section) = current.as_mut() else {
                    continue;
                };

                if section.is_beverage_section() {
                    section.items.push(MenuItem::beverage(token.line));
                } else if is_caps_invariant(token.line) {
                    let description = match rest.next() {
                        Some(Token {
                            line,
                            kind: LineKind::Text,
                        }) => *line,
                        _ => {
                            return Err(MenuParseError::MissingItemDescription(
                                token.line.to_string(),
                            ))
                        }
                    };
                    section.items.push(MenuItem::food(token.line, description));
                }
            }
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }

    // 沒走到價格標記時（例如標記就在標題行）兩個價格都視為 0
    let (without_alcohol, with_alcohol) = prices.unwrap_or((Decimal::ZERO, Decimal::ZERO));
    Menu::new(*title, sections, without_alcohol, with_alcohol)
}
