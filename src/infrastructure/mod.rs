//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation, and logging setup
//! - [`factory`] - Builds configured adapters behind their ports

pub mod config;
pub mod factory;
