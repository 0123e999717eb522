use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A watched product as stored in the products table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub shop: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub available: bool,
    pub checked_at: DateTime<Utc>,
}

impl AvailabilityResult {
    pub fn new(product: ProductRecord, available: bool) -> Self {
        Self {
            product,
            available,
            checked_at: Utc::now(),
        }
    }
}

/// Outcome of a single pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub checked: usize,
    pub available: Vec<AvailabilityResult>,
    pub notification_id: Option<String>,
    /// Ids whose deactivation failed; these will be re-notified on the next run.
    pub deactivation_failures: Vec<String>,
}
