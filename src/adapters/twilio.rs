use crate::config::NotifierConfig;
use crate::domain::model::AvailabilityResult;
use crate::domain::ports::{compose_message, Notifier};
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Sends SMS through the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioNotifier {
    config: NotifierConfig,
    base_url: String,
    client: Client,
}

impl TwilioNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_BASE)
    }

    pub fn with_base_url(config: NotifierConfig, base_url: &str) -> Self {
        Self {
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_id
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn notify(&self, available: &[AvailabilityResult]) -> Result<String> {
        let body = compose_message(available);
        let form = [
            ("To", self.config.recipient_phone.as_str()),
            ("From", self.config.sender_phone.as_str()),
            ("Body", body.as_str()),
        ];

        tracing::debug!("Sending SMS for {} products", available.len());
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_id, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| BotError::NotificationError {
                message: format!("Request to Twilio failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!("Twilio error ({}): {}", status, error_body);
            return Err(BotError::NotificationError {
                message: format!("Twilio returned {}", status),
            });
        }

        let message: MessageResponse =
            response
                .json()
                .await
                .map_err(|e| BotError::NotificationError {
                    message: format!("Failed to parse Twilio response: {}", e),
                })?;

        Ok(message.sid)
    }
}
