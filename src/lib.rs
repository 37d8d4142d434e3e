//! Dealsight - concurrent win-probability scoring for sales deals.
//!
//! This crate enriches a list of sales deals with win probabilities from a
//! remote scoring service and turns them into display rows with a
//! risk-colored bar.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Deals, prediction outcomes, and the risk-color ramp
//! - **`port`** - The [`PredictionService`](port::outbound::prediction::PredictionService) seam
//! - **`application`** - Batch aggregation, the consumer session, and row assembly
//! - **`adapter`** - The HTTP scoring client and the `dealsight` CLI
//! - **`infrastructure`** - Configuration, logging, and adapter wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dealsight::adapter::outbound::scoring::HttpPredictionClient;
//! use dealsight::application::PredictionSession;
//!
//! # async fn demo(deals: Vec<dealsight::domain::Deal>) -> dealsight::error::Result<()> {
//! let client = HttpPredictionClient::new("http://127.0.0.1:8000")?;
//! let session = PredictionSession::new(Arc::new(client));
//! let _ = session.supply(deals).await;
//! for row in session.rows() {
//!     println!("{} {}", row.deal.opportunity_id, row.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
