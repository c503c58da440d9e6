use crate::adapters::influx::line;
use crate::core::{Collector, ConfigProvider, FieldValue, MetricsSink, MetricsSnapshot, Pipeline};
use crate::utils::error::Result;

/// The measurement every point is written under.
pub const MEASUREMENT: &str = "sysmon";

pub struct SysmonPipeline<K: Collector, S: MetricsSink, C: ConfigProvider> {
    collector: K,
    sink: S,
    config: C,
}

impl<K: Collector, S: MetricsSink, C: ConfigProvider> SysmonPipeline<K, S, C> {
    pub fn new(collector: K, sink: S, config: C) -> Self {
        Self {
            collector,
            sink,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<K: Collector, S: MetricsSink, C: ConfigProvider> Pipeline for SysmonPipeline<K, S, C> {
    async fn sample(&self) -> Result<MetricsSnapshot> {
        let snapshot = self.collector.collect()?;
        tracing::debug!("snapshot: {}", serde_json::to_string(&snapshot)?);
        Ok(snapshot)
    }

    fn flatten(&self, snapshot: &MetricsSnapshot) -> Vec<(String, FieldValue)> {
        snapshot.flatten()
    }

    async fn publish(
        &self,
        snapshot: &MetricsSnapshot,
        fields: Vec<(String, FieldValue)>,
    ) -> Result<()> {
        let point = line::encode_point(
            MEASUREMENT,
            &[("hostname", self.config.hostname())],
            &fields,
            snapshot.collected_at.timestamp_nanos_opt(),
        );
        self.sink.write_point(&point).await
    }
}
