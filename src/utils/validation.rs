use crate::utils::error::{BotError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// E.164: a leading `+` and 8 to 15 digits.
pub fn validate_phone_number(field_name: &str, phone: &str) -> Result<()> {
    let re = Regex::new(r"^\+[1-9][0-9]{7,14}$").map_err(|e| BotError::ConfigError {
        message: e.to_string(),
    })?;

    if !re.is_match(phone) {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: phone.to_string(),
            reason: "Phone number must be in E.164 format, e.g. +447700900123".to_string(),
        });
    }
    Ok(())
}
