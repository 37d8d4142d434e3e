//! Outbound adapters (driven side).

pub mod scoring;
