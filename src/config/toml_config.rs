use crate::config::{NotifierConfig, DEFAULT_PRODUCTS_TABLE, DEFAULT_REGION};
use crate::core::pipeline::PipelineOptions;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based bot configuration.
///
/// ```toml
/// [notifier]
/// account_id = "${TWILIO_ACCOUNT_SID}"
/// auth_token = "${TWILIO_AUTH_TOKEN}"
/// sender_phone = "+15005550006"
/// recipient_phone = "+447700900123"
///
/// [store]
/// table = "gc-bot-products"
/// region = "eu-west-2"
///
/// [pipeline]
/// persist_results = true
/// send_notifications = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub notifier: Option<NotifierConfig>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub pipeline: PipelineOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            region: default_region(),
        }
    }
}

fn default_table() -> String {
    DEFAULT_PRODUCTS_TABLE.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl BotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| BotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("store.table", &self.store.table)?;
        validate_non_empty_string("store.region", &self.store.region)?;

        match &self.notifier {
            Some(notifier) => notifier.validate(),
            None if self.pipeline.send_notifications => Err(BotError::MissingConfigError {
                field: "notifier".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Replaces `${VAR}` with the value of `VAR`. Every referenced variable must be set.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::ConfigError {
        message: e.to_string(),
    })?;

    if let Some(missing) = re
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .find(|name| std::env::var(name).is_err())
    {
        return Err(BotError::MissingConfigError { field: missing });
    }

    let result = re.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });

    Ok(result.into_owned())
}
