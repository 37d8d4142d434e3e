//! Scoring service response bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::Recommendation;
use crate::error::PredictionError;

/// Body of a successful `/predict_deal` response.
///
/// `win_probability` is kept loose so numeric strings can be coerced; the
/// echoed `opportunity_id` is informational only.
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub opportunity_id: Option<String>,
    #[serde(default)]
    pub win_probability: Option<Value>,
}

/// Body of a `/recommend_action` response.
///
/// The service reports model failures as `{"error": "..."}` with a success
/// status.
#[derive(Debug, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub opportunity_id: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RecommendationResponse {
    /// Parse a response body into a [`Recommendation`].
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::MalformedResponse`] when the body is not
    /// JSON, carries an `error`, has no action, or has a non-numeric
    /// confidence.
    pub fn parse_recommendation(body: &[u8]) -> Result<Recommendation, PredictionError> {
        let response: Self =
            serde_json::from_slice(body).map_err(|e| PredictionError::MalformedResponse {
                reason: e.to_string(),
            })?;
        if let Some(error) = response.error {
            return Err(PredictionError::MalformedResponse {
                reason: format!("service error: {error}"),
            });
        }
        let action = response
            .recommended_action
            .filter(|action| !action.trim().is_empty())
            .ok_or_else(|| PredictionError::MalformedResponse {
                reason: "missing recommended_action".into(),
            })?;
        let confidence = match response.confidence {
            None | Some(Value::Null) => {
                return Err(PredictionError::MalformedResponse {
                    reason: "missing confidence".into(),
                })
            }
            Some(value) => coerce_probability(&value)?,
        };
        Ok(Recommendation::new(action, confidence))
    }
}

/// Body of a `/health` response.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl PredictionResponse {
    /// Parse a response body and extract the probability.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::MalformedResponse`] when the body is not
    /// JSON, has no `win_probability`, or the value is not a finite number.
    pub fn parse_probability(body: &[u8]) -> Result<f64, PredictionError> {
        let response: Self =
            serde_json::from_slice(body).map_err(|e| PredictionError::MalformedResponse {
                reason: e.to_string(),
            })?;
        match response.win_probability {
            None | Some(Value::Null) => Err(PredictionError::MalformedResponse {
                reason: "missing win_probability".into(),
            }),
            Some(value) => coerce_probability(&value),
        }
    }
}

/// Coerce a JSON value to a probability.
///
/// Numbers pass through; strings holding a number are parsed. No range
/// check is applied here, out-of-range values are kept as given.
///
/// # Errors
///
/// Returns [`PredictionError::MalformedResponse`] for any other shape or a
/// non-finite result.
pub fn coerce_probability(value: &Value) -> Result<f64, PredictionError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(p) if p.is_finite() => Ok(p),
        _ => Err(PredictionError::MalformedResponse {
            reason: format!("win_probability is not a number: {value}"),
        }),
    }
}
