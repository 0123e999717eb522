use crate::core::checker::AvailabilityChecker;
use crate::core::pipeline::check_candidates;
use crate::domain::model::{AvailabilityResult, ProductRecord};
use crate::domain::retailers;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::validate_url;

/// Checks one ad-hoc URL without touching the store or sending a message.
pub async fn run_single_check(
    checker: &AvailabilityChecker,
    url: Option<&str>,
    shop: Option<&str>,
) -> Result<Vec<AvailabilityResult>> {
    let candidate = build_candidate(url, shop)?;
    tracing::info!("Checking {} at {}", candidate.url, candidate.shop);
    check_candidates(checker, &[candidate]).await
}

fn build_candidate(url: Option<&str>, shop: Option<&str>) -> Result<ProductRecord> {
    let url = mandatory("u", url)?;
    let shop = mandatory("s", shop)?;

    if retailers::resolve(shop).is_err() {
        return Err(BotError::ValidationError {
            message: format!("Couldn't find shop {}", shop),
        });
    }

    validate_url("u", url).map_err(|e| BotError::ValidationError {
        message: e.to_string(),
    })?;

    Ok(ProductRecord {
        id: "test".to_string(),
        name: "test".to_string(),
        shop: shop.to_string(),
        url: url.to_string(),
        active: true,
    })
}

fn mandatory<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BotError::ValidationError {
            message: format!("Field '{}' is mandatory", field),
        }),
    }
}
