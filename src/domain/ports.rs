use crate::domain::model::{AvailabilityResult, ProductRecord};
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;

pub trait ProductStore: Send + Sync {
    /// Every record with `active == true`.
    fn list_active_products(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ProductRecord>>> + Send;

    /// Sets `active = false` on one record. Calling it on an inactive record succeeds.
    fn deactivate(&self, product_id: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message covering all `available` products and returns the delivery id.
    async fn notify(&self, available: &[AvailabilityResult]) -> Result<String>;
}

/// `None` stands for an unconfigured notifier; sending through it is a configuration error.
#[async_trait]
impl<N: Notifier> Notifier for Option<N> {
    async fn notify(&self, available: &[AvailabilityResult]) -> Result<String> {
        match self {
            Some(notifier) => notifier.notify(available).await,
            None => Err(BotError::MissingConfigError {
                field: "notifier".to_string(),
            }),
        }
    }
}

pub fn compose_message(available: &[AvailabilityResult]) -> String {
    let lines: Vec<String> = available
        .iter()
        .map(|result| {
            format!(
                "{} is now available at {}: {}",
                result.product.name, result.product.shop, result.product.url
            )
        })
        .collect();

    format!("\n\n{}", lines.join("\n"))
}
