use crate::core::menu_parser::MenuParseError;
use crate::core::pricing::PricingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Menu parsing failed: {0}")]
    MenuError(#[from] MenuParseError),

    #[error("Pricing failed: {0}")]
    PricingError(#[from] PricingError),

    #[error("Document error: {message}")]
    DocumentError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Document,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MenuError(_) | EtlError::PricingError(_) => ErrorCategory::Input,
            EtlError::ZipError(_) | EtlError::DocumentError { .. } => ErrorCategory::Document,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者上傳的內容有誤，修正後即可重試
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Document | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MenuError(e) => e.recovery_hint().to_string(),
            EtlError::PricingError(_) => {
                "Use a non-negative unit price and participant count, and rates between 0 and 1"
                    .to_string()
            }
            EtlError::ZipError(_) | EtlError::DocumentError { .. } => {
                "Make sure the file is a valid .docx document saved by a word processor".to_string()
            }
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in the config file or CLI flags", field)
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide '{}' in the config file or on the command line", field)
            }
            EtlError::IoError(_) => {
                "Check that the input files exist and the output path is writable".to_string()
            }
            EtlError::SerializationError(_) => {
                "Check that the JSON input matches the expected event structure".to_string()
            }
        }
    }

    /// 給終端使用者看的訊息，菜單錯誤沿用上傳流程的葡萄牙文訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MenuError(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
