//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; the service URL can be
//! overridden with the `DEALSIGHT_SERVICE_URL` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use dealsight::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::scoring::settings::PredictionServiceConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `service.base_url`.
pub const SERVICE_URL_ENV: &str = "DEALSIGHT_SERVICE_URL";

/// Template written by `dealsight config init`.
pub const CONFIG_TEMPLATE: &str = r#"# dealsight configuration

[service]
# Base URL of the scoring service. Overridden by DEALSIGHT_SERVICE_URL.
base_url = "http://127.0.0.1:8000"
predict_path = "/predict_deal"
recommend_path = "/recommend_action"
health_path = "/health"
# Per-request timeout. There is no retry.
timeout_ms = 10000
connect_timeout_ms = 2000

[logging]
# trace, debug, info, warn, error (RUST_LOG wins when set)
level = "info"
# pretty or json
format = "pretty"
"#;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Scoring service endpoint and timeouts.
    #[serde(default)]
    pub service: PredictionServiceConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `DEALSIGHT_SERVICE_URL` override, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            if !url.trim().is_empty() {
                config.service.base_url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Serialize the effective configuration back to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let service = &self.service;
        if service.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(err) = Url::parse(&service.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: err.to_string(),
            }
            .into());
        }
        for (field, path) in [
            ("predict_path", &service.predict_path),
            ("recommend_path", &service.recommend_path),
            ("health_path", &service.health_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must start with '/'".to_string(),
                }
                .into());
            }
        }
        if service.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if service.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be 'pretty' or 'json'".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = Config {
            service: PredictionServiceConfig {
                timeout_ms: 0,
                ..PredictionServiceConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "timeout_ms",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_relative_endpoint_path() {
        let config = Config {
            service: PredictionServiceConfig {
                predict_path: "predict_deal".into(),
                ..PredictionServiceConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "predict_path",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_relative_recommend_path() {
        let config = Config {
            service: PredictionServiceConfig {
                recommend_path: "recommend_action".into(),
                ..PredictionServiceConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "recommend_path",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config = Config {
            logging: LoggingConfig {
                level: "info".into(),
                format: "xml".into(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let reparsed: Config = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(reparsed, config);
    }
}
