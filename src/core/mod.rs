pub mod agent;

pub use crate::domain::model::{FieldValue, MetricsSnapshot};
pub use crate::domain::ports::{Collector, ConfigProvider, MetricsSink, Pipeline};
pub use crate::utils::error::Result;
