//! Receipt API configuration module.
//!
//! Configuration is read from command-line flags, falling back to
//! environment variables and then to defaults.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Operating environment, reported by the healthcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt API configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "receipt-api", version, about = "Receipt points API server")]
pub struct ApiConfig {
    /// API server port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Environment (development|staging|production)
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Seconds before an in-flight request is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 1_048_576)]
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8080,
            environment: Environment::Development,
            request_timeout_secs: 10,
            max_body_bytes: 1_048_576,
        }
    }
}

impl ApiConfig {
    /// Rejects values that parse but cannot be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("request-timeout-secs".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue("max-body-bytes".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::try_parse_from(["receipt-api"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config =
            ApiConfig::try_parse_from(["receipt-api", "--port", "4000", "--env", "production"])
                .unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.bind_addr(), "0.0.0.0:4000".parse().unwrap());
    }

    #[test]
    fn test_rejects_unknown_environment() {
        assert!(ApiConfig::try_parse_from(["receipt-api", "--env", "qa"]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Staging.to_string(), "staging");
    }
}
