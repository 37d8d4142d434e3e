//! Factory modules for building infrastructure components.
//!
//! # Submodules
//!
//! - [`prediction`] - Prediction service client construction

pub mod prediction;
