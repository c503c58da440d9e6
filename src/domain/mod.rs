// Domain layer: metric models and ports (interfaces). No dependencies on
// concrete sinks or platform APIs.

pub mod model;
pub mod ports;
