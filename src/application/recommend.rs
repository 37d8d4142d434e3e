//! Next-best-action lookup for a deal sequence.
//!
//! Unlike scoring, advice is a one-shot query: there is no batch numbering,
//! no shared state and no loading flag. Every deal gets one request, all
//! requests run concurrently, and the results come back in input order.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Deal, RecommendationOutcome};
use crate::port::outbound::prediction::{PredictionRequest, PredictionService};

/// Advice for one deal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealAdvice {
    pub deal: Deal,
    pub outcome: RecommendationOutcome,
}

/// Ask the service for a recommendation for every deal.
///
/// Duplicated opportunity ids are each requested and each reported.
pub async fn recommend_all(
    service: &Arc<dyn PredictionService>,
    deals: &[Deal],
) -> Vec<DealAdvice> {
    let requests = deals.iter().map(|deal| {
        let request = PredictionRequest::from(deal);
        async move {
            let result = service.recommend(&request).await;
            if let Err(error) = &result {
                warn!(
                    opportunity_id = %request.opportunity_id,
                    service = service.name(),
                    error = %error,
                    "Recommendation failed"
                );
            }
            DealAdvice {
                deal: deal.clone(),
                outcome: RecommendationOutcome::from_result(result),
            }
        }
    });
    let advice = join_all(requests).await;

    let succeeded = advice
        .iter()
        .filter(|a| a.outcome.recommendation().is_some())
        .count();
    info!(
        requested = advice.len(),
        succeeded,
        failed = advice.len() - succeeded,
        "Recommendations collected"
    );
    advice
}
