use crate::adapters::docx::{extract_docx_text, menu_to_docx};
use crate::core::menu_parser::parse_menu;
use crate::core::menu_render::render_menu_text;
use crate::core::{
    ConfigProvider, ImportFailure, ImportResult, ImportedMenu, OutputFormat, Pipeline,
    SourceDocument, Storage,
};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::path::Path;

pub const REPORT_FILE: &str = "import_report.json";

pub struct MenuImportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MenuImportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("menu")
        .to_string()
}

/// Output stems, suffixed with `-2`, `-3`... until no earlier output uses the name.
fn unique_stems(menus: &[ImportedMenu]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    menus
        .iter()
        .map(|imported| {
            let stem = file_stem(&imported.source);
            let mut candidate = stem.clone();
            let mut suffix = 1;
            while used.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}-{}", stem, suffix);
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn render(imported: &ImportedMenu, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(&imported.menu)?),
        OutputFormat::Txt => Ok(render_menu_text(&imported.menu).into_bytes()),
        OutputFormat::Docx => menu_to_docx(&imported.menu),
    }
}

fn report_json(result: &ImportResult, stems: &[String]) -> serde_json::Value {
    let imported: Vec<serde_json::Value> = result
        .menus
        .iter()
        .zip(stems)
        .map(|(imported, stem)| {
            serde_json::json!({
                "source": imported.source,
                "output": stem,
                "title": imported.menu.title(),
                "sections": imported.menu.sections().len(),
                "items": imported.menu.item_count(),
            })
        })
        .collect();

    serde_json::json!({
        "imported": imported,
        "failures": result.failures,
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MenuImportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        let mut documents = Vec::new();

        for name in self.config.input_files() {
            tracing::debug!("Reading input document: {}", name);
            let bytes = self.storage.read_file(name).await?;

            let text = match extension(name).as_deref() {
                Some("docx") => extract_docx_text(&bytes)?,
                _ => String::from_utf8(bytes).map_err(|e| EtlError::DocumentError {
                    message: format!("{} is not valid UTF-8 text: {}", name, e),
                })?,
            };

            tracing::debug!("Extracted {} characters from {}", text.len(), name);
            documents.push(SourceDocument {
                name: name.clone(),
                text,
            });
        }

        Ok(documents)
    }

    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<ImportResult> {
        let mut result = ImportResult::default();

        for document in documents {
            match parse_menu(&document.text) {
                Ok(menu) => {
                    tracing::debug!(
                        "Parsed '{}' from {}: {} sections",
                        menu.title(),
                        document.name,
                        menu.sections().len()
                    );
                    result.menus.push(ImportedMenu {
                        source: document.name,
                        menu,
                    });
                }
                Err(e) => {
                    tracing::debug!("Menu parse failed for {}: {}", document.name, e);
                    result.failures.push(ImportFailure {
                        source: document.name,
                        kind: e.kind().to_string(),
                        message: e.user_message(),
                    });
                }
            }
        }

        Ok(result)
    }

    async fn load(&self, result: ImportResult) -> Result<String> {
        let output_dir = self.config.output_path().trim_end_matches('/');
        let stems = unique_stems(&result.menus);

        for (imported, stem) in result.menus.iter().zip(&stems) {
            for format in self.config.output_formats() {
                let data = render(imported, *format)?;
                let path = format!("{}/{}.{}", output_dir, stem, format.extension());
                tracing::debug!("Writing {} ({} bytes)", path, data.len());
                self.storage.write_file(&path, &data).await?;
            }
        }

        let report = serde_json::to_vec_pretty(&report_json(&result, &stems))?;
        self.storage
            .write_file(&format!("{}/{}", output_dir, REPORT_FILE), &report)
            .await?;

        Ok(output_dir.to_string())
    }
}
