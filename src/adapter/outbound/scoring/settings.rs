//! Prediction service configuration.

use serde::{Deserialize, Serialize};

/// Where and how to reach the scoring service.
///
/// The core never enforces a timeout of its own; `timeout_ms` here is the
/// only bound on how long a single prediction may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionServiceConfig {
    /// Base URL of the service, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the scoring endpoint, appended to `base_url`.
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    /// Path of the recommendation endpoint, appended to `base_url`.
    #[serde(default = "default_recommend_path")]
    pub recommend_path: String,
    /// Path of the health endpoint, appended to `base_url`.
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_predict_path() -> String {
    "/predict_deal".into()
}

fn default_recommend_path() -> String {
    "/recommend_action".into()
}

fn default_health_path() -> String {
    "/health".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    2_000
}

impl Default for PredictionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            recommend_path: default_recommend_path(),
            health_path: default_health_path(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl PredictionServiceConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the scoring endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        join(&self.base_url, &self.predict_path)
    }

    /// Full URL of the recommendation endpoint.
    #[must_use]
    pub fn recommend_url(&self) -> String {
        join(&self.base_url, &self.recommend_path)
    }

    /// Full URL of the health endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        join(&self.base_url, &self.health_path)
    }
}

// Plain concatenation keeps any path prefix on the base URL.
fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
