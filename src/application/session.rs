//! Consumer-side session tying deal input to aggregated predictions.
//!
//! A [`PredictionSession`] plays the part of the rendering context: it owns a
//! [`Liveness`] token, remembers the last supplied deals, and starts a new
//! batch on every [`supply`](PredictionSession::supply). Every call counts as
//! a change, even when the deals are identical to the previous call, so
//! re-supplying always re-fetches.
//!
//! Dropping the session ends its liveness; batches still in flight then
//! finish without writing anything.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::aggregator::{BatchStatus, PredictionAggregator};
use super::liveness::Liveness;
use super::row::{assemble_rows, RowViewModel};
use super::state::AggregationState;
use crate::domain::Deal;
use crate::port::outbound::prediction::PredictionService;

/// Rendering session over one prediction service.
pub struct PredictionSession {
    aggregator: PredictionAggregator,
    liveness: Liveness,
    deals: RwLock<Arc<[Deal]>>,
}

impl PredictionSession {
    #[must_use]
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            aggregator: PredictionAggregator::new(service),
            liveness: Liveness::new(),
            deals: RwLock::new(Arc::from(Vec::<Deal>::new())),
        }
    }

    /// Replace the deal input and start a batch for it.
    ///
    /// The batch is started before this returns (loading is raised, earlier
    /// batches are superseded); its requests run on a spawned task. Must be
    /// called from within a Tokio runtime.
    pub fn supply(&self, deals: Vec<Deal>) -> JoinHandle<BatchStatus> {
        let deals: Arc<[Deal]> = deals.into();
        *self.deals.write() = Arc::clone(&deals);
        let batch = self.aggregator.start(deals, &self.liveness);
        tokio::spawn(batch.settle())
    }

    /// Rows for the current input against the current state.
    #[must_use]
    pub fn rows(&self) -> Vec<RowViewModel> {
        let deals = Arc::clone(&self.deals.read());
        assemble_rows(&deals, &self.aggregator.snapshot())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.aggregator.is_loading()
    }

    #[must_use]
    pub fn snapshot(&self) -> AggregationState {
        self.aggregator.snapshot()
    }

    /// Receiver that ticks on every publish, for redraw scheduling.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.aggregator.subscribe()
    }

    /// Liveness token handed to every batch this session starts.
    #[must_use]
    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }
}

impl Drop for PredictionSession {
    fn drop(&mut self) {
        self.liveness.end();
    }
}
