use crate::config::file::InfluxSection;
use crate::utils::error::{Result, SysmonError};
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use std::fmt;

/// InfluxDB connection settings, read from `INFLUXDB_*` environment
/// variables. Empty variables count as unset.
#[derive(Clone)]
pub struct InfluxSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub ssl: bool,
}

impl InfluxSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Lets tests supply a map
    /// instead of mutating the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|value| !value.is_empty());

        let port = match non_empty("INFLUXDB_PORT") {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                SysmonError::InvalidConfigValueError {
                    field: "INFLUXDB_PORT".to_string(),
                    value: raw.clone(),
                    reason: "not a valid port number".to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            host: non_empty("INFLUXDB_HOST"),
            port,
            username: non_empty("INFLUXDB_USERNAME"),
            password: non_empty("INFLUXDB_PASSWORD"),
            dbname: non_empty("INFLUXDB_DBNAME"),
            ssl: to_bool(get("INFLUXDB_SSL")),
        })
    }

    /// Overlay values from a config file section. File values win over
    /// the environment.
    pub fn apply_section(&mut self, section: &InfluxSection) {
        if let Some(host) = &section.host {
            self.host = Some(host.clone());
        }
        if let Some(port) = section.port {
            self.port = Some(port);
        }
        if let Some(username) = &section.username {
            self.username = Some(username.clone());
        }
        if let Some(password) = &section.password {
            self.password = Some(password.clone());
        }
        if let Some(dbname) = &section.dbname {
            self.dbname = Some(dbname.clone());
        }
        if let Some(ssl) = section.ssl {
            self.ssl = ssl;
        }
    }

    /// Whether enough is set to attempt a connection: host, port and
    /// database name. Credentials stay optional.
    pub fn validate_connection(&self) -> Result<()> {
        validate_required_field("INFLUXDB_HOST", &self.host)?;
        validate_required_field("INFLUXDB_PORT", &self.port)?;
        let dbname = validate_required_field("INFLUXDB_DBNAME", &self.dbname)?;
        validate_non_empty_string("INFLUXDB_DBNAME", dbname)?;
        Ok(())
    }
}

fn to_bool(value: Option<String>) -> bool {
    matches!(
        value.unwrap_or_default().to_lowercase().as_str(),
        "1" | "y" | "yes"
    )
}

// The password never appears in logs.
impl fmt::Display for InfluxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InfluxSettings {{ host: {:?}, port: {:?}, username: {:?}, password: {}, dbname: {:?}, ssl: {} }}",
            self.host,
            self.port,
            self.username,
            if self.password.is_some() { "\"***\"" } else { "None" },
            self.dbname,
            self.ssl,
        )
    }
}

impl fmt::Debug for InfluxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
