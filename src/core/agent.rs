use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Drives a pipeline once per period, forever. Failed cycles are logged
/// and the loop keeps going; a transient InfluxDB outage should not
/// take the agent down.
pub struct Agent<P: Pipeline> {
    pipeline: P,
    period: Duration,
}

impl<P: Pipeline> Agent<P> {
    pub fn new(pipeline: P, period_secs: u64) -> Self {
        Self {
            pipeline,
            period: Duration::from_secs(period_secs),
        }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!("Sampling every {}s", self.period.as_secs());

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.run_once().await {
                tracing::error!("Measurement cycle failed: {}", e);
                tracing::error!("Suggestion: {}", e.recovery_suggestion());
            }
        }
    }

    /// One full cycle: sample, flatten, publish. Returns the number of
    /// fields written.
    pub async fn run_once(&self) -> Result<usize> {
        let snapshot = self.pipeline.sample().await?;

        let fields = self.pipeline.flatten(&snapshot);
        let count = fields.len();
        tracing::debug!("Flattened snapshot into {} fields", count);

        self.pipeline.publish(&snapshot, fields).await?;
        tracing::debug!("Published {} fields", count);

        Ok(count)
    }
}
