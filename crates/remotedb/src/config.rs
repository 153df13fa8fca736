use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Remote database module configuration
///
/// Loaded once at startup and immutable afterwards; shared read-only across
/// all concurrent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDbConfig {
    /// Remote HTTP host (IP address or hostname)
    #[serde(default = "default_ip")]
    pub ip: String,

    /// Remote HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base path prepended to the lookup endpoint (empty or starting with '/')
    #[serde(default)]
    pub base: String,

    /// Connect and total-transfer timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Log level: "trace", "debug", "info", "warn", "error" (default: "info")
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_timeout() -> u64 {
    1
}

impl Default for RemoteDbConfig {
    fn default() -> Self {
        RemoteDbConfig {
            ip: default_ip(),
            port: default_port(),
            base: String::new(),
            timeout: default_timeout(),
            log_level: None,
        }
    }
}

impl RemoteDbConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: RemoteDbConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Base URL of the remote service, without the endpoint path
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.ip, self.port, self.base)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ip.is_empty() {
            return Err(ConfigError::Invalid("Host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid("Port cannot be 0".to_string()));
        }

        if self.timeout == 0 {
            return Err(ConfigError::Invalid("Timeout cannot be 0".to_string()));
        }

        if !self.base.is_empty() && !self.base.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "Base path must start with '/': {}",
                self.base
            )));
        }

        Ok(())
    }

    /// Create an example configuration file
    pub fn example() -> Self {
        RemoteDbConfig {
            ip: "127.0.0.1".to_string(),
            port: 8080,
            base: "/api".to_string(),
            timeout: 1,
            log_level: Some("info".to_string()),
        }
    }
}
