//! Next-best-action recommendations for a deal.

use serde::Serialize;

use crate::error::PredictionError;

/// Action the service suggests for one deal, with the model's confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: String,
    /// Probability of the chosen action class, in `0..=1`.
    pub confidence: f64,
}

impl Recommendation {
    #[must_use]
    pub fn new(action: impl Into<String>, confidence: f64) -> Self {
        Self {
            action: action.into(),
            confidence,
        }
    }

    /// Confidence as a whole percentage, e.g. `82%`.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}

/// Result of asking for a recommendation for one deal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Success { recommendation: Recommendation },
    Failure { error: PredictionError },
}

impl RecommendationOutcome {
    #[must_use]
    pub fn from_result(result: Result<Recommendation, PredictionError>) -> Self {
        match result {
            Ok(recommendation) => Self::Success { recommendation },
            Err(error) => Self::Failure { error },
        }
    }

    #[must_use]
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Self::Success { recommendation } => Some(recommendation),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&PredictionError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}
