use crate::domain::model::{AvailabilityResult, ProductRecord};
use crate::domain::retailers::{self, RetailerSelectors};
use crate::utils::error::{BotError, Result};
use reqwest::Client;
use scraper::{Html, Selector};

#[derive(Debug, Clone, Default)]
pub struct AvailabilityChecker {
    client: Client,
}

impl AvailabilityChecker {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn check_availability(&self, product: &ProductRecord) -> Result<AvailabilityResult> {
        // Unknown shops fail before any request goes out.
        let selectors = retailers::resolve(&product.shop)?;

        tracing::debug!("Fetching {} ({})", product.url, product.shop);
        let response = self
            .client
            .get(&product.url)
            .send()
            .await
            .map_err(|e| BotError::FetchError {
                url: product.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::FetchError {
                url: product.url.clone(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.text().await.map_err(|e| BotError::FetchError {
            url: product.url.clone(),
            reason: format!("Failed to read body: {}", e),
        })?;

        let available = evaluate_markup(&body, &selectors)?;
        tracing::debug!("{} available={}", product.url, available);

        Ok(AvailabilityResult::new(product.clone(), available))
    }
}

/// Available iff the out-of-stock marker is absent and the in-stock marker is present.
///
/// Some retailers render an empty stock container next to the basket region, so
/// neither marker is trusted on its own.
pub fn evaluate_markup(html: &str, selectors: &RetailerSelectors) -> Result<bool> {
    let out_of_stock = parse_selector(selectors.out_of_stock)?;
    let in_stock = parse_selector(selectors.in_stock)?;

    let document = Html::parse_document(html);
    let out_count = document.select(&out_of_stock).count();
    let in_count = document.select(&in_stock).count();

    Ok(out_count == 0 && in_count > 0)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| BotError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
