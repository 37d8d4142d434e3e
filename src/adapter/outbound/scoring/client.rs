//! Scoring service REST client.
//!
//! Sends one `POST` per deal to the scoring or recommendation endpoint and
//! maps the reply onto the prediction port's error taxonomy:
//!
//! - non-success status → [`PredictionError::Service`]
//! - no response at all → [`PredictionError::Transport`] (`"transport error"`)
//! - success with an unusable body → [`PredictionError::MalformedResponse`]
//!
//! There is no retry; the configured HTTP timeout is the only timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use url::Url;

use super::dto::{HealthResponse, PredictionResponse, RecommendationResponse};
use super::settings::PredictionServiceConfig;
use crate::domain::Recommendation;
use crate::error::{Error, PredictionError, Result};
use crate::port::outbound::prediction::{PredictionRequest, PredictionService};

/// HTTP client for the scoring service.
pub struct HttpPredictionClient {
    http: HttpClient,
    predict_url: Url,
    recommend_url: Url,
    health_url: Url,
}

impl HttpPredictionClient {
    /// Create a client for `base_url` with default paths and no timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URLs do not parse.
    pub fn new(base_url: &str) -> Result<Self> {
        let config = PredictionServiceConfig::with_base_url(base_url);
        Ok(Self {
            http: HttpClient::new(),
            predict_url: Url::parse(&config.predict_url())?,
            recommend_url: Url::parse(&config.recommend_url())?,
            health_url: Url::parse(&config.health_url())?,
        })
    }

    /// Create a client from configuration, applying its timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URLs do not parse.
    pub fn from_config(config: &PredictionServiceConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            predict_url: Url::parse(&config.predict_url())?,
            recommend_url: Url::parse(&config.recommend_url())?,
            health_url: Url::parse(&config.health_url())?,
        })
    }

    /// Scoring endpoint this client posts to.
    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// Recommendation endpoint this client posts to.
    #[must_use]
    pub fn recommend_url(&self) -> &Url {
        &self.recommend_url
    }

    /// Health endpoint this client probes.
    #[must_use]
    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

impl HttpPredictionClient {
    /// Post one deal and return the raw body of a successful reply.
    async fn post_deal(
        &self,
        url: &Url,
        request: &PredictionRequest,
    ) -> std::result::Result<Vec<u8>, PredictionError> {
        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                debug!(
                    opportunity_id = %request.opportunity_id,
                    endpoint = url.path(),
                    error = %err,
                    "Scoring request did not complete"
                );
                PredictionError::transport()
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Service {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|err| {
            debug!(
                opportunity_id = %request.opportunity_id,
                endpoint = url.path(),
                error = %err,
                "Scoring response body was cut off"
            );
            PredictionError::transport()
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<f64, PredictionError> {
        let body = self.post_deal(&self.predict_url, request).await?;
        PredictionResponse::parse_probability(&body)
    }

    async fn recommend(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<Recommendation, PredictionError> {
        let body = self.post_deal(&self.recommend_url, request).await?;
        RecommendationResponse::parse_recommendation(&body)
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .http
            .get(self.health_url.clone())
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<HealthResponse>()
            .await?;

        if response.status.eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(Error::Connection(format!(
                "service reported status '{}'",
                response.status
            )))
        }
    }
}
