use clap::Parser;
use sysmon::utils::{logger, validation::Validate};
use sysmon::{Agent, AgentSettings, CliConfig, HostCollector, InfluxSink, LogSink, SysmonPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let debug = cli.debug || cli.no_db;
    logger::init_logger(debug);

    tracing::info!("Starting sysmon agent");
    if debug {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match AgentSettings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("Reporting metrics for hostname '{}'", settings.hostname);
    tracing::debug!("Influx settings: {}", settings.influx);

    let period_secs = settings.period_secs;
    let collector = HostCollector::new(settings.disk_usage_paths.clone());

    if settings.no_db {
        tracing::info!("Database disabled; points will be logged at debug level");
        let pipeline = SysmonPipeline::new(collector, LogSink, settings);
        Agent::new(pipeline, period_secs).run().await?;
    } else {
        let sink = match InfluxSink::new(&settings.influx) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::error!("❌ Could not set up the InfluxDB writer: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(2);
            }
        };
        let pipeline = SysmonPipeline::new(collector, sink, settings);
        Agent::new(pipeline, period_secs).run().await?;
    }

    Ok(())
}
