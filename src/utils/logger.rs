use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Bot output only; the reqwest/hyper stack stays quiet.
const CLI_DIRECTIVES: &str = "gc_stock_bot=info,warn";
const CLI_VERBOSE_DIRECTIVES: &str = "gc_stock_bot=debug,reqwest=debug,warn";

/// The AWS SDK and the Lambda runtime log every request at info.
const LAMBDA_DIRECTIVES: &str =
    "gc_stock_bot=info,aws_config=warn,aws_smithy_runtime=warn,aws_sdk_dynamodb=warn,lambda_runtime=warn,warn";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        CLI_VERBOSE_DIRECTIVES
    } else {
        CLI_DIRECTIVES
    }
}

/// `RUST_LOG` wins over the built-in directives when it parses.
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_cli_logger(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(default_directives(verbose)))
        .with(layer)
        .init();
}

pub fn init_lambda_logger() {
    // CloudWatch stamps each line itself
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .without_time()
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter(LAMBDA_DIRECTIVES))
        .with(layer)
        .init();
}
