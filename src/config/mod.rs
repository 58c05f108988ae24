#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const SUPPORTED_INPUT_EXTENSIONS: [&str; 2] = ["docx", "txt"];

/// Resolved settings for one menu import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    pub input_files: Vec<String>,
    pub output_path: String,
    pub output_formats: Vec<OutputFormat>,
}

impl ImportSettings {
    pub const DEFAULT_OUTPUT_PATH: &'static str = "./output";
}

impl ConfigProvider for ImportSettings {
    fn input_files(&self) -> &[String] {
        &self.input_files
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }
}

impl Validate for ImportSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_not_empty("input", &self.input_files)?;
        validation::validate_file_extensions(
            "input",
            &self.input_files,
            &SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_not_empty("formats", &self.output_formats)?;
        Ok(())
    }
}
