use crate::config::toml_config::ImportConfig;
use crate::config::ImportSettings;
use crate::domain::model::OutputFormat;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Parser)]
#[command(name = "menu-etl")]
#[command(about = "Menu document import, event pricing and service-order fields")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to an optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse menu documents (.docx or .txt) into structured menus
    Import(ImportArgs),
    /// Compute fee and discount totals for an event
    Price(PriceArgs),
    /// Map an event JSON record to service-order template fields
    ServiceOrder(ServiceOrderArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Menu documents to import
    #[arg(long, value_delimiter = ',', required = true)]
    pub input: Vec<String>,

    /// Output directory (default: ./output)
    #[arg(long)]
    pub output_path: Option<String>,

    /// Output formats (default: json)
    #[arg(long, value_delimiter = ',', value_enum)]
    pub formats: Vec<OutputFormat>,
}

impl ImportArgs {
    /// 命令列參數優先，其次為設定檔，最後為預設值
    pub fn into_settings(self, defaults: &ImportConfig) -> ImportSettings {
        let output_path = self
            .output_path
            .or_else(|| defaults.output_path.clone())
            .unwrap_or_else(|| ImportSettings::DEFAULT_OUTPUT_PATH.to_string());

        let output_formats = if self.formats.is_empty() {
            defaults
                .output_formats
                .clone()
                .unwrap_or_else(|| vec![OutputFormat::Json])
        } else {
            self.formats
        };

        ImportSettings {
            input_files: self.input,
            output_path,
            output_formats,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Price per person, before service fee
    #[arg(long)]
    pub unit_price: Decimal,

    #[arg(long)]
    pub participants: i64,

    /// Overrides pricing.service_fee_rate
    #[arg(long)]
    pub service_fee_rate: Option<Decimal>,

    /// Overrides pricing.discount_rate
    #[arg(long)]
    pub discount_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Args)]
pub struct ServiceOrderArgs {
    /// Event record as JSON
    #[arg(long)]
    pub event: String,

    /// Write the fields to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Overrides service_order.utc_offset_minutes
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,
}
