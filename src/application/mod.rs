//! Application services (use cases).
//!
//! The enrichment pipeline: a [`PredictionAggregator`](aggregator::PredictionAggregator)
//! scores a deal sequence batch by batch, a [`PredictionSession`](session::PredictionSession)
//! drives it from changing input, and [`row`] projects the result for display.
//! [`recommend`] is the one-shot next-best-action lookup.

pub mod aggregator;
pub mod liveness;
pub mod recommend;
pub mod row;
pub mod session;
pub mod state;

pub use aggregator::{BatchId, BatchStatus, BatchSummary, PendingBatch, PredictionAggregator};
pub use liveness::Liveness;
pub use recommend::{recommend_all, DealAdvice};
pub use row::{assemble_rows, BarColor, RowViewModel};
pub use session::PredictionSession;
pub use state::AggregationState;
