use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Unknown retailer '{retailer}'")]
    UnknownRetailer { retailer: String },

    #[error("Product store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Product '{id}' not found in store")]
    ProductNotFound { id: String },

    #[error("Failed to fetch {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Notification failed: {message}")]
    NotificationError { message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::UnknownRetailer { .. }
            | BotError::InvalidSelector { .. }
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::ConfigError { .. } => ErrorCategory::Configuration,
            BotError::FetchError { .. } | BotError::NotificationError { .. } => {
                ErrorCategory::Network
            }
            BotError::StoreUnavailable { .. } | BotError::ProductNotFound { .. } => {
                ErrorCategory::Storage
            }
            BotError::ValidationError { .. } => ErrorCategory::Input,
            BotError::IoError(_) | BotError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BotError::ValidationError { .. } => ErrorSeverity::Low,
            BotError::FetchError { .. } | BotError::ProductNotFound { .. } => {
                ErrorSeverity::Medium
            }
            BotError::NotificationError { .. } | BotError::StoreUnavailable { .. } => {
                ErrorSeverity::High
            }
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BotError::UnknownRetailer { .. } => format!(
                "Use one of the configured retailers: {}",
                crate::domain::retailers::known_retailers().join(", ")
            ),
            BotError::InvalidSelector { .. } => {
                "Fix the selector in the retailer table".to_string()
            }
            BotError::StoreUnavailable { .. } => {
                "Check AWS credentials, region and table name".to_string()
            }
            BotError::ProductNotFound { .. } => {
                "The record may have been deleted between load and persist".to_string()
            }
            BotError::FetchError { .. } => {
                "Check the product URL is reachable from this host".to_string()
            }
            BotError::NotificationError { .. } => {
                "Check the Twilio credentials and phone numbers".to_string()
            }
            BotError::ValidationError { .. } => {
                "Usage: gc-stock-bot --run -u <url> -s <retailer>".to_string()
            }
            BotError::MissingConfigError { field } => {
                format!("Set the '{}' setting", field)
            }
            BotError::InvalidConfigValueError { field, .. } => {
                format!("Correct the '{}' setting", field)
            }
            BotError::ConfigError { .. } => "Review the bot configuration".to_string(),
            BotError::IoError(_) => "Check file paths and permissions".to_string(),
            BotError::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::ValidationError { message } => message.clone(),
            BotError::UnknownRetailer { retailer } => format!("Couldn't find shop {}", retailer),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
