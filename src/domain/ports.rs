use crate::domain::model::{FieldValue, MetricsSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of metric snapshots. Implementations own whatever platform
/// state they need and may refresh it on every call.
pub trait Collector: Send + Sync {
    fn collect(&self) -> Result<MetricsSnapshot>;
}

/// Destination for encoded line-protocol points.
pub trait MetricsSink: Send + Sync {
    fn write_point(&self, line: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn hostname(&self) -> &str;
    fn disk_usage_paths(&self) -> &[String];
    fn period_secs(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn sample(&self) -> Result<MetricsSnapshot>;
    fn flatten(&self, snapshot: &MetricsSnapshot) -> Vec<(String, FieldValue)>;
    async fn publish(
        &self,
        snapshot: &MetricsSnapshot,
        fields: Vec<(String, FieldValue)>,
    ) -> Result<()>;
}
