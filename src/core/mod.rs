pub mod etl;
pub mod menu_parser;
pub mod menu_render;
pub mod pipeline;
pub mod pricing;
pub mod service_order;

pub use crate::domain::model::{
    ImportFailure, ImportResult, ImportedMenu, OutputFormat, SourceDocument,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
