// Adapters layer: concrete implementations of the domain ports for external systems.

#[cfg(feature = "lambda")]
pub mod dynamo;
pub mod twilio;
