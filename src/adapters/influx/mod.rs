pub mod line;

use crate::config::influx::InfluxSettings;
use crate::domain::ports::MetricsSink;
use crate::utils::error::{Result, SysmonError};
use crate::utils::validation::{validate_required_field, validate_url};
use reqwest::Client;

/// Writes line-protocol points to an InfluxDB 1.x `/write` endpoint.
#[derive(Debug, Clone)]
pub struct InfluxSink {
    client: Client,
    write_url: String,
    dbname: String,
    username: Option<String>,
    password: Option<String>,
}

impl InfluxSink {
    pub fn new(settings: &InfluxSettings) -> Result<Self> {
        let host = validate_required_field("INFLUXDB_HOST", &settings.host)?;
        let port = validate_required_field("INFLUXDB_PORT", &settings.port)?;
        let dbname = validate_required_field("INFLUXDB_DBNAME", &settings.dbname)?;

        let scheme = if settings.ssl { "https" } else { "http" };
        let write_url = format!("{}://{}:{}/write", scheme, host, port);
        validate_url("influx.endpoint", &write_url)?;

        Ok(Self {
            client: Client::new(),
            write_url,
            dbname: dbname.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }
}

impl MetricsSink for InfluxSink {
    async fn write_point(&self, line: &str) -> Result<()> {
        tracing::debug!("POST {} db={}", self.write_url, self.dbname);

        let mut request = self
            .client
            .post(&self.write_url)
            .query(&[("db", self.dbname.as_str())])
            .body(line.to_string());

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SysmonError::WriteRejectedError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(ssl: bool) -> InfluxSettings {
        InfluxSettings {
            host: Some("influx.local".to_string()),
            port: Some(8086),
            username: Some("sysmon".to_string()),
            password: Some("secret".to_string()),
            dbname: Some("metrics".to_string()),
            ssl,
        }
    }

    #[test]
    fn test_write_url_uses_http_by_default() {
        let sink = InfluxSink::new(&settings(false)).unwrap();
        assert_eq!(sink.write_url, "http://influx.local:8086/write");
    }

    #[test]
    fn test_write_url_uses_https_when_ssl() {
        let sink = InfluxSink::new(&settings(true)).unwrap();
        assert_eq!(sink.write_url, "https://influx.local:8086/write");
    }

    #[test]
    fn test_missing_host_is_rejected() {
        let mut incomplete = settings(false);
        incomplete.host = None;

        let err = InfluxSink::new(&incomplete).unwrap_err();
        assert!(matches!(
            err,
            SysmonError::MissingConfigError { ref field } if field == "INFLUXDB_HOST"
        ));
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut bad = settings(false);
        bad.host = Some("influx local".to_string());

        assert!(InfluxSink::new(&bad).is_err());
    }
}
