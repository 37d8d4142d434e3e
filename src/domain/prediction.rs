//! Per-deal prediction outcomes.

use serde::Serialize;

use crate::error::PredictionError;

/// Result of scoring one deal.
///
/// A settled batch holds exactly one outcome per submitted opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// The service returned a win probability.
    Success { win_probability: f64 },
    /// The request failed; siblings in the batch are unaffected.
    Failure { error: PredictionError },
}

impl PredictionOutcome {
    /// Build an outcome from a client result.
    #[must_use]
    pub fn from_result(result: Result<f64, PredictionError>) -> Self {
        match result {
            Ok(win_probability) => Self::Success { win_probability },
            Err(error) => Self::Failure { error },
        }
    }

    /// Win probability, when the prediction succeeded.
    #[must_use]
    pub fn win_probability(&self) -> Option<f64> {
        match self {
            Self::Success { win_probability } => Some(*win_probability),
            Self::Failure { .. } => None,
        }
    }

    /// Failure cause, when the prediction failed.
    #[must_use]
    pub fn failure(&self) -> Option<&PredictionError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
