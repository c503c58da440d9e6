pub mod file;
pub mod influx;

use crate::config::file::FileConfig;
use crate::config::influx::InfluxSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SysmonError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PERIOD_SECS: u64 = 10;

#[derive(Debug, Clone, Parser)]
#[command(name = "sysmon")]
#[command(about = "Export host hardware metrics to InfluxDB")]
pub struct CliConfig {
    /// Set logging level to DEBUG
    #[arg(short, long)]
    pub debug: bool,

    /// Don't connect to an Influx database. Implies --debug.
    #[arg(short, long)]
    pub no_db: bool,

    /// Period for taking measurements, in seconds
    #[arg(short, long)]
    pub period: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Fully resolved agent settings. Precedence: CLI over config file over
/// environment over defaults.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub hostname: String,
    pub disk_usage_paths: Vec<String>,
    pub period_secs: u64,
    pub no_db: bool,
    pub influx: InfluxSettings,
}

impl AgentSettings {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with(cli, |key| std::env::var(key).ok())
    }

    pub fn load_with<F>(cli: &CliConfig, get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        let agent_section = file.agent.unwrap_or_default();

        let mut influx = InfluxSettings::from_lookup(&get)?;
        if let Some(section) = &file.influx {
            influx.apply_section(section);
        }

        let hostname = agent_section
            .hostname
            .filter(|name| !name.is_empty())
            .or_else(|| resolve_hostname(&get))
            .unwrap_or_else(|| "unknown".to_string());

        let disk_usage_paths = agent_section
            .disk_usage_paths
            .or_else(|| {
                get("APP_DISK_USAGE_PATHS")
                    .filter(|value| !value.is_empty())
                    .map(|value| value.split(',').map(str::to_string).collect())
            })
            .unwrap_or_else(|| vec!["/".to_string()]);

        let period_secs = cli
            .period
            .or(agent_section.period)
            .unwrap_or(DEFAULT_PERIOD_SECS);

        Ok(Self {
            hostname,
            disk_usage_paths,
            period_secs,
            no_db: cli.no_db,
            influx,
        })
    }
}

/// `APP_HOSTNAME`, then `HOST`, then `HOSTNAME`, then whatever the OS
/// reports. Empty variables fall through.
fn resolve_hostname<F>(get: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["APP_HOSTNAME", "HOST", "HOSTNAME"]
        .iter()
        .find_map(|key| get(key).filter(|value| !value.is_empty()))
        .or_else(sysinfo::System::host_name)
}

impl ConfigProvider for AgentSettings {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn disk_usage_paths(&self) -> &[String] {
        &self.disk_usage_paths
    }

    fn period_secs(&self) -> u64 {
        self.period_secs
    }
}

impl Validate for AgentSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("agent.period", self.period_secs, 1)?;
        validate_non_empty_string("agent.hostname", &self.hostname)?;

        if self.disk_usage_paths.is_empty() {
            return Err(SysmonError::InvalidConfigValueError {
                field: "agent.disk_usage_paths".to_string(),
                value: String::new(),
                reason: "At least one disk path is required".to_string(),
            });
        }
        for path in &self.disk_usage_paths {
            validate_path("agent.disk_usage_paths", path)?;
        }

        if !self.no_db {
            self.influx.validate_connection()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli() -> CliConfig {
        CliConfig {
            debug: false,
            no_db: true,
            period: None,
            config: None,
        }
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = AgentSettings::load_with(&cli(), lookup(&[])).unwrap();

        assert_eq!(settings.period_secs, 10);
        assert_eq!(settings.disk_usage_paths, vec!["/".to_string()]);
        // falls back to the OS host name, or "unknown" where unavailable
        assert!(!settings.hostname.is_empty());
    }

    #[test]
    fn test_app_hostname_wins() {
        let settings = AgentSettings::load_with(
            &cli(),
            lookup(&[
                ("APP_HOSTNAME", "explicit"),
                ("HOST", "login-host"),
                ("HOSTNAME", "shell-host"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.hostname, "explicit");
    }

    #[test]
    fn test_empty_app_hostname_falls_through() {
        let settings = AgentSettings::load_with(
            &cli(),
            lookup(&[("APP_HOSTNAME", ""), ("HOST", "login-host")]),
        )
        .unwrap();

        assert_eq!(settings.hostname, "login-host");
    }

    #[test]
    fn test_disk_paths_are_comma_separated() {
        let settings =
            AgentSettings::load_with(&cli(), lookup(&[("APP_DISK_USAGE_PATHS", "/,/dev")]))
                .unwrap();

        assert_eq!(
            settings.disk_usage_paths,
            vec!["/".to_string(), "/dev".to_string()]
        );
    }

    #[test]
    fn test_cli_period_wins() {
        let mut cli = cli();
        cli.period = Some(60);

        let settings = AgentSettings::load_with(&cli, lookup(&[])).unwrap();
        assert_eq!(settings.period_secs, 60);
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let mut cli = cli();
        cli.period = Some(0);

        let settings = AgentSettings::load_with(&cli, lookup(&[])).unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_requires_influx_vars_without_no_db() {
        let mut cli = cli();
        cli.no_db = false;

        let settings = AgentSettings::load_with(&cli, lookup(&[])).unwrap();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SysmonError::MissingConfigError { .. }));
    }

    #[test]
    fn test_validate_passes_with_complete_influx_vars() {
        let mut cli = cli();
        cli.no_db = false;

        let settings = AgentSettings::load_with(
            &cli,
            lookup(&[
                ("INFLUXDB_HOST", "influx.local"),
                ("INFLUXDB_PORT", "8086"),
                ("INFLUXDB_DBNAME", "metrics"),
            ]),
        )
        .unwrap();

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_config_file_overrides_env_but_not_cli() {
        use std::io::Write;
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "[agent]\nperiod = 30\nhostname = \"file-host\"\n\n[influx]\nhost = \"file-influx\"\n"
        )
        .unwrap();

        let mut cli = cli();
        cli.config = Some(temp_file.path().to_path_buf());
        cli.period = Some(60);

        let settings = AgentSettings::load_with(
            &cli,
            lookup(&[
                ("APP_HOSTNAME", "env-host"),
                ("INFLUXDB_HOST", "env-influx"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.period_secs, 60);
        assert_eq!(settings.hostname, "file-host");
        assert_eq!(settings.influx.host.as_deref(), Some("file-influx"));
    }

    #[test]
    fn test_no_db_skips_influx_validation() {
        let settings = AgentSettings::load_with(&cli(), lookup(&[])).unwrap();
        assert!(settings.validate().is_ok());
    }
}
