use clap::Parser;
use gc_stock_bot::core::standalone::run_single_check;
use gc_stock_bot::utils::logger;
use gc_stock_bot::{AvailabilityChecker, CliConfig};

// Usage: gc-stock-bot --run -u "<url>" -s "<retailer>"
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // help and version land here too; neither is a failure
            println!("{}", e);
            return Ok(());
        }
    };

    logger::init_cli_logger(config.verbose);

    if !config.run {
        tracing::info!("Nothing to do; pass --run -u <url> -s <retailer> to check a page");
        return Ok(());
    }

    let checker = AvailabilityChecker::new();
    match run_single_check(&checker, config.url.as_deref(), config.shop.as_deref()).await {
        Ok(available) => {
            println!("{}", serde_json::to_string_pretty(&available)?);
        }
        Err(e) => {
            tracing::error!(
                "Standalone check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
            println!("{}", e.user_friendly_message());
        }
    }

    Ok(())
}
