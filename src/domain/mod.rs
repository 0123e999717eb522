// Domain layer: product models, the retailer table and ports (interfaces) to the store and notifier.

pub mod model;
pub mod ports;
pub mod retailers;
