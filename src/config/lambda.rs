use crate::config::toml_config::{BotConfig, StoreConfig};
use crate::config::{NotifierConfig, DEFAULT_PRODUCTS_TABLE, DEFAULT_REGION};
use crate::core::pipeline::PipelineOptions;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::Validate;
use std::env;

/// Names a TOML file that replaces the environment-variable configuration.
pub const CONFIG_PATH_VAR: &str = "BOT_CONFIG";

/// Loads and validates the function's configuration from the process environment.
pub fn load_config() -> Result<BotConfig> {
    let config = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            BotConfig::from_file(path)?
        }
        Err(_) => config_from_lookup(|key| env::var(key).ok())?,
    };

    config.validate()?;
    Ok(config)
}

pub fn config_from_lookup<F>(lookup: F) -> Result<BotConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let pipeline = PipelineOptions {
        persist_results: flag(&lookup, "PERSIST_RESULTS")?,
        send_notifications: flag(&lookup, "SEND_NOTIFICATIONS")?,
    };

    let notifier = match (
        lookup("TWILIO_ACCOUNT_SID"),
        lookup("TWILIO_AUTH_TOKEN"),
        lookup("TWILIO_ACCOUNT_PHONE"),
        lookup("PERSONAL_PHONE"),
    ) {
        (Some(account_id), Some(auth_token), Some(sender_phone), Some(recipient_phone)) => {
            Some(NotifierConfig {
                account_id,
                auth_token,
                sender_phone,
                recipient_phone,
            })
        }
        (None, None, None, None) => None,
        (account_id, auth_token, sender_phone, _) => {
            let field = if account_id.is_none() {
                "TWILIO_ACCOUNT_SID"
            } else if auth_token.is_none() {
                "TWILIO_AUTH_TOKEN"
            } else if sender_phone.is_none() {
                "TWILIO_ACCOUNT_PHONE"
            } else {
                "PERSONAL_PHONE"
            };
            return Err(BotError::MissingConfigError {
                field: field.to_string(),
            });
        }
    };

    Ok(BotConfig {
        notifier,
        store: StoreConfig {
            table: lookup("PRODUCTS_TABLE").unwrap_or_else(|| DEFAULT_PRODUCTS_TABLE.to_string()),
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        },
        pipeline,
    })
}

fn flag<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(true),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(BotError::InvalidConfigValueError {
            field: key.to_string(),
            value: other.to_string(),
            reason: "Expected true/false".to_string(),
        }),
    }
}
