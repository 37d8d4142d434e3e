//! HTTP adapter for the remote deal-scoring service.
//!
//! - [`client`] - [`HttpPredictionClient`](client::HttpPredictionClient),
//!   the reqwest-backed [`PredictionService`](crate::port::outbound::prediction::PredictionService)
//! - [`dto`] - Response bodies and probability coercion
//! - [`settings`] - Endpoint and timeout configuration

pub mod client;
pub mod dto;
pub mod settings;

pub use client::HttpPredictionClient;
pub use settings::PredictionServiceConfig;
