//! Shared aggregation state.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{OpportunityId, PredictionOutcome};

/// Consolidated prediction results for one rendering session.
///
/// The outcome map is only ever replaced wholesale, at the publish point of
/// the current batch; it is never merged or updated per item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationState {
    outcomes: HashMap<OpportunityId, PredictionOutcome>,
    loading: bool,
}

impl AggregationState {
    /// Create an empty, not-loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome recorded for an opportunity in the last published batch.
    #[must_use]
    pub fn outcome(&self, id: &OpportunityId) -> Option<&PredictionOutcome> {
        self.outcomes.get(id)
    }

    /// All outcomes of the last published batch.
    #[must_use]
    pub fn outcomes(&self) -> &HashMap<OpportunityId, PredictionOutcome> {
        &self.outcomes
    }

    /// Whether a batch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Swap in a batch's outcomes and clear the loading flag.
    pub(crate) fn publish(&mut self, outcomes: HashMap<OpportunityId, PredictionOutcome>) {
        self.outcomes = outcomes;
        self.loading = false;
    }
}
