//! Domain validation errors for core domain types.
//!
//! Returned when a supplied deal violates a domain invariant. Deals are
//! validated once, at the supply boundary, and are immutable afterwards.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Every deal needs a non-blank identity.
    #[error("opportunity_id cannot be empty")]
    EmptyOpportunityId,

    /// Close value is a monetary amount and cannot be negative.
    #[error("close_value must be non-negative for {opportunity_id}, got {close_value}")]
    NegativeCloseValue {
        /// The deal carrying the invalid value.
        opportunity_id: String,
        /// The invalid value that was provided.
        close_value: rust_decimal::Decimal,
    },
}
