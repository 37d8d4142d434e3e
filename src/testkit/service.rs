//! Scripted prediction service for tests.
//!
//! [`ScriptedPredictionService`] answers from a per-opportunity script,
//! records every request it sees, and can hold responses for chosen
//! opportunities until the test releases them. Recommendations have their
//! own script and request log but share the holds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::domain::{OpportunityId, Recommendation};
use crate::error::{Error, PredictionError, Result};
use crate::port::outbound::prediction::{PredictionRequest, PredictionService};

type Scripted = std::result::Result<f64, PredictionError>;
type ScriptedAdvice = std::result::Result<Recommendation, PredictionError>;

/// Action returned for opportunities without scripted advice.
pub const DEFAULT_ACTION: &str = "Follow up";

/// In-memory [`PredictionService`] driven by a script.
pub struct ScriptedPredictionService {
    script: Mutex<HashMap<OpportunityId, Scripted>>,
    fallback: Scripted,
    advice: Mutex<HashMap<OpportunityId, ScriptedAdvice>>,
    advice_requests: Mutex<Vec<PredictionRequest>>,
    holds: Mutex<HashMap<OpportunityId, Arc<Semaphore>>>,
    requests: Mutex<Vec<PredictionRequest>>,
    calls: AtomicUsize,
    healthy: bool,
}

impl Default for ScriptedPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPredictionService {
    /// Service that answers `0.5` for anything not scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback(Ok(0.5))
    }

    /// Service that answers `fallback` for anything not scripted.
    #[must_use]
    pub fn with_fallback(fallback: Scripted) -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            fallback,
            advice: Mutex::new(HashMap::new()),
            advice_requests: Mutex::new(Vec::new()),
            holds: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            healthy: true,
        }
    }

    /// Make the health check fail.
    #[must_use]
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Script a win probability for one opportunity.
    #[must_use]
    pub fn probability(self, id: &str, win_probability: f64) -> Self {
        self.script
            .lock()
            .insert(OpportunityId::from(id), Ok(win_probability));
        self
    }

    /// Script a failure for one opportunity.
    #[must_use]
    pub fn failure(self, id: &str, error: PredictionError) -> Self {
        self.script.lock().insert(OpportunityId::from(id), Err(error));
        self
    }

    /// Script a recommendation for one opportunity.
    #[must_use]
    pub fn recommendation(self, id: &str, action: &str, confidence: f64) -> Self {
        self.advice.lock().insert(
            OpportunityId::from(id),
            Ok(Recommendation::new(action, confidence)),
        );
        self
    }

    /// Script a recommendation failure for one opportunity.
    #[must_use]
    pub fn recommendation_failure(self, id: &str, error: PredictionError) -> Self {
        self.advice.lock().insert(OpportunityId::from(id), Err(error));
        self
    }

    /// Hold responses for `id` until [`release`](Self::release) is called.
    pub fn hold(&self, id: &str) {
        self.holds
            .lock()
            .insert(OpportunityId::from(id), Arc::new(Semaphore::new(0)));
    }

    /// Let every held and future request for `id` complete.
    pub fn release(&self, id: &str) {
        if let Some(gate) = self.holds.lock().get(&OpportunityId::from(id)) {
            gate.close();
        }
    }

    /// Total number of `predict` calls seen.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `predict` calls seen for one opportunity.
    pub fn calls_for(&self, id: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.opportunity_id.as_str() == id)
            .count()
    }

    /// Every request seen, in arrival order.
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().clone()
    }

    /// Every `recommend` request seen, in arrival order.
    pub fn recommend_requests(&self) -> Vec<PredictionRequest> {
        self.advice_requests.lock().clone()
    }

    async fn wait_for_release(&self, id: &OpportunityId) {
        let gate = self.holds.lock().get(id).cloned();
        if let Some(gate) = gate {
            // A closed gate fails the acquire, which is the release signal.
            let _ = gate.acquire().await;
        }
    }
}

#[async_trait]
impl PredictionService for ScriptedPredictionService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn predict(&self, request: &PredictionRequest) -> Scripted {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        self.wait_for_release(&request.opportunity_id).await;

        self.script
            .lock()
            .get(&request.opportunity_id)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    async fn recommend(&self, request: &PredictionRequest) -> ScriptedAdvice {
        self.advice_requests.lock().push(request.clone());
        self.wait_for_release(&request.opportunity_id).await;

        self.advice
            .lock()
            .get(&request.opportunity_id)
            .cloned()
            .unwrap_or_else(|| Ok(Recommendation::new(DEFAULT_ACTION, 0.5)))
    }

    async fn health(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(Error::Connection("scripted service unhealthy".into()))
        }
    }
}
