#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{BotConfig, StoreConfig};

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_phone_number, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PRODUCTS_TABLE: &str = "gc-bot-products";
pub const DEFAULT_REGION: &str = "eu-west-2";

/// Credentials and phone numbers for the SMS notifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub account_id: String,
    pub auth_token: String,
    pub sender_phone: String,
    pub recipient_phone: String,
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("account_id", &self.account_id)
            .field("auth_token", &"<redacted>")
            .field("sender_phone", &self.sender_phone)
            .field("recipient_phone", &self.recipient_phone)
            .finish()
    }
}

impl Validate for NotifierConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("account_id", &self.account_id)?;
        validate_non_empty_string("auth_token", &self.auth_token)?;
        validate_phone_number("sender_phone", &self.sender_phone)?;
        validate_phone_number("recipient_phone", &self.recipient_phone)?;
        Ok(())
    }
}
