pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{storage::LocalStorage, toml_config::AppConfig, ImportSettings};

pub use core::{
    etl::EtlEngine, menu_parser::parse_menu, pipeline::MenuImportPipeline,
    pricing::compute_pricing, service_order::map_event_to_service_order_fields,
};
pub use domain::model::{Event, Menu, PricingConfig, PricingOutputs};
pub use utils::error::{EtlError, Result};
