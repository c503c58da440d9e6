use thiserror::Error;

#[derive(Error, Debug)]
pub enum SysmonError {
    #[error("InfluxDB request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Metric collection failed: {message}")]
    CollectError { message: String },

    #[error("InfluxDB rejected write with status {status}: {body}")]
    WriteRejectedError { status: u16, body: String },
}

impl SysmonError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SysmonError::ApiError(e) => format!("Could not reach InfluxDB: {}", e),
            SysmonError::IoError(e) => format!("File system problem: {}", e),
            SysmonError::SerializationError(e) => format!("Data formatting problem: {}", e),
            SysmonError::ConfigParseError { field, message } => {
                format!("Configuration file problem ({}): {}", field, message)
            }
            SysmonError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            SysmonError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => {
                format!("Setting '{}' has invalid value '{}': {}", field, value, reason)
            }
            SysmonError::CollectError { message } => {
                format!("Could not read system metrics: {}", message)
            }
            SysmonError::WriteRejectedError { status, .. } => {
                format!("InfluxDB refused the write (HTTP {})", status)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SysmonError::ApiError(_) => {
                "Check that InfluxDB is running and INFLUXDB_HOST/INFLUXDB_PORT are correct"
            }
            SysmonError::IoError(_) => "Check file permissions and that the path exists",
            SysmonError::SerializationError(_) => "This is likely a bug; please report it",
            SysmonError::ConfigParseError { .. } => "Fix the configuration file and restart",
            SysmonError::MissingConfigError { .. } => {
                "Set the variable in the environment or config file, or run with --no-db"
            }
            SysmonError::InvalidConfigValueError { .. } => {
                "Correct the value in the environment or config file"
            }
            SysmonError::CollectError { .. } => {
                "Check APP_DISK_USAGE_PATHS points at mounted filesystems"
            }
            SysmonError::WriteRejectedError { .. } => {
                "Check the database exists and the credentials have write permission"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SysmonError>;
