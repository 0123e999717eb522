use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "gc-stock-bot")]
#[command(about = "Check a single product page for stock without touching the store")]
pub struct CliConfig {
    #[arg(long, help = "Run a standalone availability check")]
    pub run: bool,

    #[arg(short = 'u', help = "Product page URL")]
    pub url: Option<String>,

    #[arg(short = 's', help = "Retailer id, e.g. currys")]
    pub shop: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
