pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

#[cfg(feature = "lambda")]
pub use crate::adapters::dynamo::DynamoProductStore;

pub use crate::adapters::twilio::TwilioNotifier;
pub use crate::config::{BotConfig, NotifierConfig};
pub use crate::core::{
    checker::AvailabilityChecker,
    invocation::{invocation_response, InvocationResponse},
    pipeline::{PipelineOptions, StockPipeline},
};
pub use crate::domain::model::{AvailabilityResult, PipelineReport, ProductRecord};
pub use crate::utils::error::{BotError, Result};
