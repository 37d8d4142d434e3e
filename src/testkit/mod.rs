//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for deals and deal sequences.
//! - [`service`] - Scripted in-memory
//!   [`PredictionService`](crate::port::outbound::prediction::PredictionService)
//!   that counts calls and can hold individual responses.

pub mod domain;
pub mod service;
