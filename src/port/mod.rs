//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams where the application talks to the outside world.
//! Adapters implement them; the application only ever sees the trait.
//!
//! # Available Ports
//!
//! - [`PredictionService`](outbound::prediction::PredictionService) - Remote
//!   win-probability scoring, one request per deal

pub mod outbound;
