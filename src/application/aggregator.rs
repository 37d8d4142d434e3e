//! Prediction aggregation across a batch of deals.
//!
//! A batch fans out one [`PredictionService::predict`] call per deal, joins on
//! every call settling, and then publishes the consolidated outcome map in a
//! single write. Batches are numbered; starting a new one supersedes every
//! earlier one, and a superseded batch drops its results without touching
//! shared state.
//!
//! Starting and settling are split: [`PredictionAggregator::start`] runs
//! synchronously (bumps the batch number, raises the loading flag) and
//! [`PendingBatch::settle`] does the I/O.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::liveness::Liveness;
use super::state::AggregationState;
use crate::domain::{Deal, OpportunityId, PredictionOutcome};
use crate::port::outbound::prediction::{PredictionRequest, PredictionService};

/// Monotonic batch number, unique per aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BatchId(u64);

impl BatchId {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counts for a published batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub batch: BatchId,
    /// Requests issued, one per supplied deal.
    pub requested: usize,
    /// Entries in the published map that hold a probability.
    pub succeeded: usize,
    /// Entries in the published map that hold a failure.
    pub failed: usize,
    pub completed_at: DateTime<Utc>,
}

/// How a batch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    /// The batch was current when it settled and its map is now visible.
    Published(BatchSummary),
    /// A newer batch started, or the consumer went away, before this one
    /// settled. Nothing was written.
    Stale { batch: BatchId },
}

impl BatchStatus {
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    #[must_use]
    pub fn summary(&self) -> Option<&BatchSummary> {
        match self {
            Self::Published(summary) => Some(summary),
            Self::Stale { .. } => None,
        }
    }

    #[must_use]
    pub fn batch(&self) -> BatchId {
        match self {
            Self::Published(summary) => summary.batch,
            Self::Stale { batch } => *batch,
        }
    }
}

struct Inner {
    state: AggregationState,
    current: BatchId,
}

struct Shared {
    inner: RwLock<Inner>,
    published: watch::Sender<u64>,
}

impl Shared {
    fn notify(&self) {
        self.published.send_modify(|count| *count += 1);
    }
}

/// Fans prediction requests out per deal and publishes the results.
///
/// Cloning is cheap and every clone shares the same state, so one clone can
/// start batches while another is read by the renderer.
#[derive(Clone)]
pub struct PredictionAggregator {
    service: Arc<dyn PredictionService>,
    shared: Arc<Shared>,
}

impl PredictionAggregator {
    /// Create an aggregator with empty, idle state.
    #[must_use]
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        let (published, _) = watch::channel(0);
        Self {
            service,
            shared: Arc::new(Shared {
                inner: RwLock::new(Inner {
                    state: AggregationState::new(),
                    current: BatchId::default(),
                }),
                published,
            }),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AggregationState {
        self.shared.inner.read().state.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.inner.read().state.is_loading()
    }

    /// Most recently started batch.
    #[must_use]
    pub fn current_batch(&self) -> BatchId {
        self.shared.inner.read().current
    }

    /// Receiver that ticks every time a map is published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.published.subscribe()
    }

    /// Start a batch for `deals`, superseding any batch still in flight.
    ///
    /// Runs synchronously: the batch number is bumped and the loading flag
    /// raised before this returns. An empty sequence publishes an empty map
    /// immediately and leaves the loading flag down. When `liveness` has
    /// already ended nothing is written and the current batch stays current,
    /// so a departed consumer cannot supersede a live one.
    pub fn start(&self, deals: impl Into<Arc<[Deal]>>, liveness: &Liveness) -> PendingBatch {
        let deals = deals.into();
        let alive = liveness.is_alive();
        let id = {
            let mut inner = self.shared.inner.write();
            if alive {
                inner.current = inner.current.next();
                if deals.is_empty() {
                    inner.state.publish(HashMap::new());
                } else {
                    inner.state.set_loading(true);
                }
            }
            inner.current
        };

        if !alive {
            debug!(batch = %id, "Consumer gone, batch not started");
        } else if deals.is_empty() {
            self.shared.notify();
        }

        info!(batch = %id, deals = deals.len(), "Starting prediction batch");

        PendingBatch {
            id,
            deals,
            liveness: liveness.clone(),
            service: Arc::clone(&self.service),
            shared: Arc::clone(&self.shared),
            armed: alive,
        }
    }

    /// Start a batch and wait for it to settle.
    pub async fn run(&self, deals: impl Into<Arc<[Deal]>>, liveness: &Liveness) -> BatchStatus {
        self.start(deals, liveness).settle().await
    }
}

/// A started batch whose results have not been published yet.
///
/// Dropping it, or the future returned by [`settle`](Self::settle), before
/// it publishes clears the loading flag if the batch is still current and
/// its consumer alive.
#[must_use = "a batch does nothing until settled"]
pub struct PendingBatch {
    id: BatchId,
    deals: Arc<[Deal]>,
    liveness: Liveness,
    service: Arc<dyn PredictionService>,
    shared: Arc<Shared>,
    armed: bool,
}

impl PendingBatch {
    #[must_use]
    pub fn id(&self) -> BatchId {
        self.id
    }

    #[must_use]
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// Issue every request, wait for all of them, then publish.
    ///
    /// Individual failures become [`PredictionOutcome::Failure`] entries and
    /// never abort the batch. If the batch is no longer current (or its
    /// consumer ended) once everything has settled, the results are dropped.
    pub async fn settle(mut self) -> BatchStatus {
        if self.deals.is_empty() {
            self.armed = false;
            return if self.is_current() {
                BatchStatus::Published(BatchSummary {
                    batch: self.id,
                    requested: 0,
                    succeeded: 0,
                    failed: 0,
                    completed_at: Utc::now(),
                })
            } else {
                BatchStatus::Stale { batch: self.id }
            };
        }

        if !self.liveness.is_alive() {
            debug!(batch = %self.id, "Consumer gone, skipping prediction batch");
            return BatchStatus::Stale { batch: self.id };
        }

        let started = Instant::now();
        let service = &self.service;
        let requests = self.deals.iter().map(|deal| {
            let request = PredictionRequest::from(deal);
            async move {
                let result = service.predict(&request).await;
                (request.opportunity_id, result)
            }
        });
        let results = join_all(requests).await;

        let mut outcomes: HashMap<OpportunityId, PredictionOutcome> =
            HashMap::with_capacity(results.len());
        for (opportunity_id, result) in results {
            if let Err(error) = &result {
                warn!(
                    batch = %self.id,
                    opportunity_id = %opportunity_id,
                    service = service.name(),
                    error = %error,
                    "Prediction failed"
                );
            }
            // Later duplicates overwrite earlier ones.
            outcomes.insert(opportunity_id, PredictionOutcome::from_result(result));
        }

        let succeeded = outcomes.values().filter(|o| o.is_success()).count();
        let summary = BatchSummary {
            batch: self.id,
            requested: self.deals.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            completed_at: Utc::now(),
        };

        if self.publish(outcomes) {
            info!(
                batch = %self.id,
                requested = summary.requested,
                succeeded = summary.succeeded,
                failed = summary.failed,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Prediction batch published"
            );
            BatchStatus::Published(summary)
        } else {
            debug!(batch = %self.id, "Discarding stale prediction batch");
            BatchStatus::Stale { batch: self.id }
        }
    }

    fn is_current(&self) -> bool {
        self.shared.inner.read().current == self.id && self.liveness.is_alive()
    }

    /// Publish if this batch is still current and its consumer alive.
    ///
    /// The currency check and the write share one lock acquisition.
    fn publish(&mut self, outcomes: HashMap<OpportunityId, PredictionOutcome>) -> bool {
        self.armed = false;
        {
            let mut inner = self.shared.inner.write();
            if inner.current != self.id || !self.liveness.is_alive() {
                return false;
            }
            inner.state.publish(outcomes);
        }
        self.shared.notify();
        true
    }
}

impl Drop for PendingBatch {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.shared.inner.write();
        if inner.current == self.id && self.liveness.is_alive() {
            inner.state.set_loading(false);
            debug!(batch = %self.id, "Prediction batch dropped before publishing");
        }
    }
}
