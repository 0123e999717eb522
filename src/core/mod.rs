pub mod checker;
pub mod invocation;
pub mod pipeline;
pub mod standalone;

pub use crate::domain::model::{AvailabilityResult, PipelineReport, ProductRecord};
pub use crate::domain::ports::{Notifier, ProductStore};
pub use crate::utils::error::Result;
