use crate::domain::ports::MetricsSink;
use crate::utils::error::Result;

/// Sink for `--no-db` runs: logs the encoded point instead of writing it.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl MetricsSink for LogSink {
    async fn write_point(&self, line: &str) -> Result<()> {
        tracing::debug!("not connected to a database, dropping point: {}", line);
        Ok(())
    }
}
