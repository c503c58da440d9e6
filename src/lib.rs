pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::influx::InfluxSink;
pub use adapters::sink::LogSink;
pub use adapters::system::HostCollector;
pub use app::pipelines::sysmon_pipeline::SysmonPipeline;
pub use config::{AgentSettings, CliConfig};
pub use crate::core::agent::Agent;
pub use utils::error::{Result, SysmonError};
