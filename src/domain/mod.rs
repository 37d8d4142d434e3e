//! Core domain types for deal scoring.
//!
//! Everything here is free of I/O: deals as supplied by the caller,
//! prediction outcomes keyed by opportunity, next-best-action
//! recommendations, and the pure risk-color mapping.

pub mod color;
pub mod deal;
pub mod error;
pub mod id;
pub mod prediction;
pub mod recommendation;

pub use color::{color_for, Rgb};
pub use deal::Deal;
pub use id::OpportunityId;
pub use prediction::PredictionOutcome;
pub use recommendation::{Recommendation, RecommendationOutcome};
