use serde::Serialize;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Why a single prediction request did not yield a probability.
///
/// Stored as the failure payload of a
/// [`PredictionOutcome`](crate::domain::prediction::PredictionOutcome), so it
/// is cheap to clone and serializes into row output.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionError {
    /// The service answered with a non-success status.
    #[error("prediction service returned status {status_code}")]
    Service { status_code: u16 },

    /// No response was received at all.
    #[error("{reason}")]
    Transport { reason: String },

    /// A success status whose body carried no usable probability.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl PredictionError {
    /// Generic reason recorded for transport-level faults.
    pub const TRANSPORT_REASON: &'static str = "transport error";

    /// Transport fault with the generic reason string.
    #[must_use]
    pub fn transport() -> Self {
        Self::Transport {
            reason: Self::TRANSPORT_REASON.to_string(),
        }
    }

    /// HTTP status code, when the failure came from the service.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Service { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_uses_generic_reason() {
        let err = PredictionError::transport();
        assert_eq!(err.to_string(), "transport error");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn service_failure_exposes_status() {
        let err = PredictionError::Service { status_code: 500 };
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.to_string(), "prediction service returned status 500");
    }

    #[test]
    fn prediction_error_serializes_with_kind_tag() {
        let value = serde_json::to_value(PredictionError::Service { status_code: 404 }).unwrap();
        assert_eq!(value["kind"], "service");
        assert_eq!(value["status_code"], 404);
    }

    #[test]
    fn config_error_converts_into_error() {
        let err: Error = ConfigError::MissingField { field: "base_url" }.into();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "base_url" })
        ));
    }
}
