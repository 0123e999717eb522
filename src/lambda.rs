use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client as DynamoClient;
use gc_stock_bot::config::lambda::load_config;
use gc_stock_bot::utils::logger;
use gc_stock_bot::{
    invocation_response, AvailabilityChecker, DynamoProductStore, InvocationResponse,
    StockPipeline, TwilioNotifier,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

type BotPipeline = StockPipeline<DynamoProductStore, Option<TwilioNotifier>>;

async fn function_handler(
    pipeline: &BotPipeline,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Starting stock check");

    // any pipeline failure fails the invocation
    let report = pipeline.run().await?;

    if !report.deactivation_failures.is_empty() {
        tracing::warn!(
            failed = ?report.deactivation_failures,
            "Some products could not be deactivated and may be notified again"
        );
    }

    let response = invocation_response(&report, event.payload)?;

    tracing::info!(
        checked = report.checked,
        available = report.available.len(),
        "Stock check completed"
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = load_config().map_err(|e| {
        tracing::error!("Configuration failed: {} ({})", e, e.recovery_suggestion());
        e
    })?;

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.store.region.clone()))
        .load()
        .await;
    let store = DynamoProductStore::new(DynamoClient::new(&aws), config.store.table.clone());
    let notifier = config.notifier.clone().map(TwilioNotifier::new);

    let pipeline = StockPipeline::new(store, notifier, AvailabilityChecker::new(), config.pipeline);
    let pipeline = &pipeline;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(pipeline, event).await
    }))
    .await
}
