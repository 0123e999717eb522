use crate::core::checker::AvailabilityChecker;
use crate::domain::model::{AvailabilityResult, PipelineReport, ProductRecord};
use crate::domain::ports::{Notifier, ProductStore};
use crate::utils::error::{BotError, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub persist_results: bool,
    pub send_notifications: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            persist_results: true,
            send_notifications: true,
        }
    }
}

pub struct StockPipeline<S: ProductStore, N: Notifier> {
    store: S,
    notifier: N,
    checker: AvailabilityChecker,
    options: PipelineOptions,
}

impl<S: ProductStore, N: Notifier> StockPipeline<S, N> {
    pub fn new(store: S, notifier: N, checker: AvailabilityChecker, options: PipelineOptions) -> Self {
        Self {
            store,
            notifier,
            checker,
            options,
        }
    }

    pub async fn run(&self) -> Result<PipelineReport> {
        tracing::info!("Loading active products...");
        let candidates = self.store.list_active_products().await?;
        tracing::info!("Loaded {} active products", candidates.len());

        if candidates.is_empty() {
            return Ok(PipelineReport::default());
        }

        tracing::info!("Checking availability...");
        let available = check_candidates(&self.checker, &candidates).await?;
        tracing::info!(
            "{} of {} products available",
            available.len(),
            candidates.len()
        );

        let mut report = PipelineReport {
            checked: candidates.len(),
            ..PipelineReport::default()
        };

        if available.is_empty() {
            tracing::info!("No products available, nothing to notify or deactivate");
            return Ok(report);
        }

        if self.options.send_notifications {
            tracing::info!("Sending notification...");
            let delivery_id = self.notifier.notify(&available).await?;
            tracing::info!("Notification sent: {}", delivery_id);
            report.notification_id = Some(delivery_id);
        } else {
            tracing::info!("Notifications disabled, skipping send");
        }

        if self.options.persist_results {
            report.deactivation_failures = self.deactivate_all(&available).await;
        } else {
            tracing::info!("Persistence disabled, products stay active");
        }

        report.available = available;
        Ok(report)
    }

    async fn deactivate_all(&self, available: &[AvailabilityResult]) -> Vec<String> {
        let mut failures = Vec::new();

        for result in available {
            let id = &result.product.id;
            match self.store.deactivate(id).await {
                Ok(()) => tracing::debug!("Deactivated product {}", id),
                Err(e) => {
                    tracing::warn!(
                        product_id = %id,
                        error = %e,
                        "Failed to deactivate product; it will be notified again on the next run"
                    );
                    failures.push(id.clone());
                }
            }
        }

        failures
    }
}

/// Checks every candidate concurrently and keeps the available ones.
///
/// All checks settle before a decision is made; any failure fails the whole
/// batch with the first error in candidate order.
pub async fn check_candidates(
    checker: &AvailabilityChecker,
    candidates: &[ProductRecord],
) -> Result<Vec<AvailabilityResult>> {
    let outcomes = join_all(
        candidates
            .iter()
            .map(|candidate| checker.check_availability(candidate)),
    )
    .await;

    let mut results = Vec::with_capacity(outcomes.len());
    let mut first_error: Option<BotError> = None;

    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::error!(
                    product_id = %candidate.id,
                    url = %candidate.url,
                    error = %e,
                    "Availability check failed"
                );
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    Ok(results.into_iter().filter(|r| r.available).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use regex::Regex;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const IN_STOCK_PAGE: &str = r#"<div class="product-page"><div class="touch"></div></div>
        <div data-component="add-to-basket-button-wrapper"><button>Add to basket</button></div>"#;

    const OUT_OF_STOCK_PAGE: &str =
        r#"<div class="product-page"><div class="touch"><p class="oos">Sold out</p></div></div>"#;

    #[derive(Clone, Default)]
    struct MockStore {
        products: Arc<Mutex<HashMap<String, ProductRecord>>>,
        deactivate_calls: Arc<Mutex<Vec<String>>>,
        failing_ids: HashSet<String>,
        unavailable: bool,
    }

    impl MockStore {
        fn with_products(products: Vec<ProductRecord>) -> Self {
            let store = Self::default();
            {
                let mut map = store.products.try_lock().unwrap();
                for product in products {
                    map.insert(product.id.clone(), product);
                }
            }
            store
        }

        fn failing_for(mut self, id: &str) -> Self {
            self.failing_ids.insert(id.to_string());
            self
        }

        async fn deactivations(&self) -> Vec<String> {
            self.deactivate_calls.lock().await.clone()
        }

        async fn is_active(&self, id: &str) -> bool {
            self.products.lock().await[id].active
        }
    }

    impl ProductStore for MockStore {
        async fn list_active_products(&self) -> Result<Vec<ProductRecord>> {
            if self.unavailable {
                return Err(BotError::StoreUnavailable {
                    message: "connection refused".to_string(),
                });
            }
            let products = self.products.lock().await;
            let mut active: Vec<ProductRecord> =
                products.values().filter(|p| p.active).cloned().collect();
            active.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(active)
        }

        async fn deactivate(&self, product_id: &str) -> Result<()> {
            self.deactivate_calls
                .lock()
                .await
                .push(product_id.to_string());
            if self.failing_ids.contains(product_id) {
                return Err(BotError::StoreUnavailable {
                    message: "timeout".to_string(),
                });
            }
            let mut products = self.products.lock().await;
            match products.get_mut(product_id) {
                Some(product) => {
                    product.active = false;
                    Ok(())
                }
                None => Err(BotError::ProductNotFound {
                    id: product_id.to_string(),
                }),
            }
        }
    }

    #[derive(Clone, Default)]
    struct MockNotifier {
        calls: Arc<Mutex<Vec<Vec<AvailabilityResult>>>>,
        fail: bool,
    }

    impl MockNotifier {
        async fn calls(&self) -> Vec<Vec<AvailabilityResult>> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(&self, available: &[AvailabilityResult]) -> Result<String> {
            self.calls.lock().await.push(available.to_vec());
            if self.fail {
                return Err(BotError::NotificationError {
                    message: "Twilio returned 401".to_string(),
                });
            }
            Ok("SM123".to_string())
        }
    }

    fn product(id: &str, shop: &str, url: String) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {}", id),
            shop: shop.to_string(),
            url,
            active: true,
        }
    }

    fn pipeline(
        store: MockStore,
        notifier: MockNotifier,
        options: PipelineOptions,
    ) -> StockPipeline<MockStore, MockNotifier> {
        StockPipeline::new(store, notifier, AvailabilityChecker::new(), options)
    }

    #[tokio::test]
    async fn test_in_stock_product_is_notified_and_deactivated() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path("/u");
            then.status(200).body(IN_STOCK_PAGE);
        });

        let store = MockStore::with_products(vec![product("1", "currys", server.url("/u"))]);
        let notifier = MockNotifier::default();
        let report = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap();

        page.assert();
        assert_eq!(report.checked, 1);
        assert_eq!(report.available.len(), 1);
        assert!(report.available[0].available);
        assert_eq!(report.available[0].product.id, "1");
        assert_eq!(report.notification_id.as_deref(), Some("SM123"));
        assert!(report.deactivation_failures.is_empty());

        let calls = notifier.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].product.id, "1");
        assert_eq!(store.deactivations().await, vec!["1".to_string()]);
        assert!(!store.is_active("1").await);
    }

    #[tokio::test]
    async fn test_unknown_shop_fails_run_without_side_effects() {
        let store = MockStore::with_products(vec![product(
            "1",
            "asda",
            "http://127.0.0.1:9/p".to_string(),
        )]);
        let notifier = MockNotifier::default();
        let err = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::UnknownRetailer { retailer } if retailer == "asda"));
        assert!(notifier.calls().await.is_empty());
        assert!(store.deactivations().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_short_circuits() {
        let store = MockStore::default();
        let notifier = MockNotifier::default();
        let report = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap();

        assert_eq!(report.checked, 0);
        assert!(report.available.is_empty());
        assert!(notifier.calls().await.is_empty());
        assert!(store.deactivations().await.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_available_sends_nothing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/oos");
            then.status(200).body(OUT_OF_STOCK_PAGE);
        });

        let store = MockStore::with_products(vec![product("1", "currys", server.url("/oos"))]);
        let notifier = MockNotifier::default();
        let report = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap();

        assert_eq!(report.checked, 1);
        assert!(report.available.is_empty());
        assert!(notifier.calls().await.is_empty());
        assert!(store.deactivations().await.is_empty());
        assert!(store.is_active("1").await);
    }

    #[tokio::test]
    async fn test_inactive_records_are_not_checked() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path("/done");
            then.status(200).body(IN_STOCK_PAGE);
        });

        let mut done = product("1", "currys", server.url("/done"));
        done.active = false;
        let store = MockStore::with_products(vec![done]);
        let notifier = MockNotifier::default();
        let report = pipeline(store, notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap();

        page.assert_hits(0);
        assert_eq!(report.checked, 0);
        assert!(notifier.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_fails_run_after_all_checks_settle() {
        let server = MockServer::start();
        let ok_page = server.mock(|when, then| {
            when.method(GET).path("/ok");
            then.status(200).body(IN_STOCK_PAGE);
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500);
        });

        let store = MockStore::with_products(vec![
            product("1", "currys", server.url("/broken")),
            product("2", "currys", server.url("/ok")),
        ]);
        let notifier = MockNotifier::default();
        let err = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::FetchError { .. }));
        ok_page.assert();
        assert!(notifier.calls().await.is_empty());
        assert!(store.deactivations().await.is_empty());
    }

    #[tokio::test]
    async fn test_deactivation_failure_does_not_block_others() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_matches(Regex::new("^/p/").unwrap());
            then.status(200).body(IN_STOCK_PAGE);
        });

        let store = MockStore::with_products(vec![
            product("1", "currys", server.url("/p/1")),
            product("2", "currys", server.url("/p/2")),
            product("3", "currys", server.url("/p/3")),
        ])
        .failing_for("2");
        let notifier = MockNotifier::default();
        let report = pipeline(store.clone(), notifier.clone(), PipelineOptions::default())
            .run()
            .await
            .unwrap();

        assert_eq!(report.available.len(), 3);
        assert_eq!(report.deactivation_failures, vec!["2".to_string()]);
        assert_eq!(store.deactivations().await, vec!["1", "2", "3"]);
        assert!(!store.is_active("1").await);
        assert!(store.is_active("2").await);
        assert!(!store.is_active("3").await);
        assert_eq!(notifier.calls().await.len(), 1);
        assert_eq!(notifier.calls().await[0].len(), 3);
    }

    #[tokio::test]
    async fn test_notification_failure_propagates_and_skips_persist() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/u");
            then.status(200).body(IN_STOCK_PAGE);
        });

        let store = MockStore::with_products(vec![product("1", "currys", server.url("/u"))]);
        let notifier = MockNotifier {
            fail: true,
            ..MockNotifier::default()
        };
        let err = pipeline(store.clone(), notifier, PipelineOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::NotificationError { .. }));
        assert!(store.deactivations().await.is_empty());
        assert!(store.is_active("1").await);
    }

    #[tokio::test]
    async fn test_store_unavailable_propagates() {
        let store = MockStore {
            unavailable: true,
            ..MockStore::default()
        };
        let err = pipeline(store, MockNotifier::default(), PipelineOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_disabled_toggles_skip_notify_and_persist() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/u");
            then.status(200).body(IN_STOCK_PAGE);
        });

        let store = MockStore::with_products(vec![product("1", "currys", server.url("/u"))]);
        let notifier = MockNotifier::default();
        let options = PipelineOptions {
            persist_results: false,
            send_notifications: false,
        };
        let report = pipeline(store.clone(), notifier.clone(), options)
            .run()
            .await
            .unwrap();

        assert_eq!(report.available.len(), 1);
        assert!(report.notification_id.is_none());
        assert!(notifier.calls().await.is_empty());
        assert!(store.deactivations().await.is_empty());
        assert!(store.is_active("1").await);
    }

    #[tokio::test]
    async fn test_deactivate_is_idempotent() {
        let store = MockStore::with_products(vec![product("1", "currys", "U".to_string())]);

        store.deactivate("1").await.unwrap();
        store.deactivate("1").await.unwrap();

        assert!(!store.is_active("1").await);
        assert!(store.list_active_products().await.unwrap().is_empty());
    }
}
