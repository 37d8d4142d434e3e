//! Prediction port for scoring deals.
//!
//! Defines the contract for the remote service that turns one deal into a
//! win probability or a next-best-action recommendation.
//!
//! # Overview
//!
//! - [`PredictionService`]: Scores or advises on a single deal
//! - [`PredictionRequest`]: The wire payload for one scoring request

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Deal, OpportunityId, Recommendation};
use crate::error::{PredictionError, Result};

/// Payload sent to the prediction service for one deal.
///
/// Carries exactly the fields the scoring model consumes; `deal_stage` is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub opportunity_id: OpportunityId,
    pub sales_agent: String,
    pub product: String,
    pub account: String,
    pub engage_date: String,
    pub close_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub close_value: Decimal,
}

impl From<&Deal> for PredictionRequest {
    fn from(deal: &Deal) -> Self {
        Self {
            opportunity_id: deal.opportunity_id.clone(),
            sales_agent: deal.sales_agent.clone(),
            product: deal.product.clone(),
            account: deal.account.clone(),
            engage_date: deal.engage_date.clone(),
            close_date: deal.close_date.clone(),
            close_value: deal.close_value,
        }
    }
}

/// Remote scoring service for deals.
///
/// Implementations issue one request per call and never retry; whatever
/// timeout the transport enforces is the only timeout in play.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) because a batch keeps
/// many requests outstanding at once.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Return the service name for logging.
    fn name(&self) -> &'static str;

    /// Score one deal and return its win probability.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Service`] for a non-success status,
    /// [`PredictionError::Transport`] when no response arrived, and
    /// [`PredictionError::MalformedResponse`] when the body has no usable
    /// probability.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<f64, PredictionError>;

    /// Ask for the next best action on one deal.
    ///
    /// Takes the same payload as [`predict`](Self::predict).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`predict`](Self::predict); a body that reports an
    /// error or lacks an action is [`PredictionError::MalformedResponse`].
    async fn recommend(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<Recommendation, PredictionError>;

    /// Check that the service is reachable and healthy.
    ///
    /// # Errors
    ///
    /// Returns an error if the health endpoint cannot be reached or reports
    /// a failure.
    async fn health(&self) -> Result<()>;
}
