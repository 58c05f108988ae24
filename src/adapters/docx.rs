//! Minimal WordprocessingML support: raw text out of a `.docx`, and a plain
//! menu document back in.

use crate::core::menu_parser::parse_menu;
use crate::core::menu_render::menu_lines;
use crate::domain::model::Menu;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::io::{Read, Write};
use std::sync::LazyLock;
use zip::write::{FileOptions, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("paragraph pattern is valid")
});

static RUN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?/>|<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:br(?:\s[^>]*)?/>")
        .expect("run pattern is valid")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#x([0-9A-Fa-f]+)|#([0-9]+)|(lt|gt|quot|apos|amp));")
        .expect("entity pattern is valid")
});

/// Decodes the predefined entities and numeric character references in one pass.
fn unescape_xml(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                (None, None) => {
                    return match &caps[3] {
                        "lt" => "<",
                        "gt" => ">",
                        "quot" => "\"",
                        "apos" => "'",
                        _ => "&",
                    }
                    .to_string();
                }
            };
            // 無效的字元參照保留原文
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn paragraph_text(body: &str) -> String {
    let mut text = String::new();
    for caps in RUN_CONTENT.captures_iter(body) {
        match caps.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None if caps[0].starts_with("<w:tab") => text.push('\t'),
            None if caps[0].starts_with("<w:br") => text.push('\n'),
            None => {}
        }
    }
    text
}

/// Text of `word/document.xml`, one paragraph per entry followed by a blank line.
pub fn document_xml_text(xml: &str) -> String {
    PARAGRAPH
        .captures_iter(xml)
        .map(|caps| {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            format!("{}\n\n", paragraph_text(body))
        })
        .collect()
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| EtlError::DocumentError {
        message: format!("{} not found in package: {}", DOCUMENT_PART, e),
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(document_xml_text(&xml))
}

pub fn menu_from_docx(bytes: &[u8]) -> Result<Menu> {
    let text = extract_docx_text(bytes)?;
    Ok(parse_menu(&text)?)
}

fn paragraph_xml(text: &str, bold: bool) -> String {
    let run_props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        r#"<w:p><w:r>{}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        run_props,
        escape_xml(text)
    )
}

fn menu_document_xml(menu: &Menu) -> String {
    let lines = menu_lines(menu);
    let last_price_lines = lines.len().saturating_sub(3);

    let paragraphs: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            // 標題、區段標題與價格區塊加粗
            let bold = i == 0 || i >= last_price_lines || line.ends_with(':');
            paragraph_xml(line, bold)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        paragraphs
    )
}

pub fn menu_to_docx(menu: &Menu) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;

    zip.start_file::<_, ()>(DOCUMENT_PART, FileOptions::default())?;
    zip.write_all(menu_document_xml(menu).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MenuItem, MenuSection};
    use rust_decimal::Decimal;

    #[test]
    fn test_document_xml_text_splits_paragraphs() {
        let xml = r#"<w:document><w:body>
            <w:p w:rsidR="00A1"><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Menu</w:t></w:r><w:r><w:t xml:space="preserve"> Teste</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Arroz &amp; feijão</w:t><w:tab/><w:t>x</w:t></w:r></w:p>
        </w:body></w:document>"#;

        assert_eq!(document_xml_text(xml), "Menu Teste\n\n\n\nArroz & feijão\tx\n\n");
    }

    #[test]
    fn test_line_break_inside_paragraph() {
        let xml = "<w:p><w:r><w:t>BRUSCHETTA</w:t><w:br/><w:t>Pão italiano</w:t></w:r></w:p>";
        assert_eq!(document_xml_text(xml), "BRUSCHETTA\nPão italiano\n\n");
    }

    #[test]
    fn test_numeric_character_references_are_decoded() {
        assert_eq!(unescape_xml("Fil&#xE9;&#160;mignon"), "Filé\u{a0}mignon");
        assert_eq!(unescape_xml("Caf&#233; &amp;lt;"), "Café &lt;");
        assert_eq!(unescape_xml("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_self_closing_text_run_is_empty() {
        let xml = r#"<w:p><w:r><w:t xml:space="preserve"/></w:r><w:r><w:t>VINHO</w:t></w:r></w:p>"#;
        assert_eq!(document_xml_text(xml), "VINHO\n\n");
    }

    #[test]
    fn test_escape_round_trip() {
        let text = r#"Queijo <brie> & "mel""#;
        assert_eq!(unescape_xml(&escape_xml(text)), text);
    }

    #[test]
    fn test_missing_document_part_is_document_error() {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("readme.txt", FileOptions::default())
            .unwrap();
        zip.write_all(b"nada").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(matches!(err, EtlError::DocumentError { .. }));
    }

    #[test]
    fn test_not_a_zip_is_zip_error() {
        let err = extract_docx_text(b"plain text").unwrap_err();
        assert!(matches!(err, EtlError::ZipError(_)));
    }

    #[test]
    fn test_menu_docx_round_trip() {
        let menu = Menu::new(
            "Menu <Especial> & Cia",
            vec![
                MenuSection {
                    title: "ENTRADAS".to_string(),
                    items: vec![MenuItem::food("BRUSCHETTA", "Pão italiano com tomate")],
                },
                MenuSection {
                    title: "Bebidas".to_string(),
                    items: vec![MenuItem::beverage("Vinho tinto")],
                },
            ],
            Decimal::new(10000, 2),
            Decimal::new(15000, 2),
        )
        .unwrap();

        let bytes = menu_to_docx(&menu).unwrap();
        assert_eq!(menu_from_docx(&bytes).unwrap(), menu);
    }
}
