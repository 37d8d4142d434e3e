//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Deal`] and [`OpportunityId`] so
//! tests focus on assertions rather than construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::{Deal, OpportunityId};

/// Create an [`OpportunityId`] from a string.
pub fn opportunity(id: &str) -> OpportunityId {
    OpportunityId::from(id)
}

/// Create a deal with the given id and close value and fixed attributes.
pub fn deal(id: &str, close_value: Decimal) -> Deal {
    Deal {
        opportunity_id: opportunity(id),
        sales_agent: "Moses Frase".into(),
        product: "GTX Plus Basic".into(),
        account: "Cancity".into(),
        engage_date: "2016-10-20".into(),
        close_date: "2017-03-01".into(),
        close_value,
        deal_stage: None,
    }
}

/// Generate `n` deals named `d0`, `d1`, ..., `d{n-1}`.
pub fn make_deals(n: usize) -> Vec<Deal> {
    (0..n)
        .map(|i| deal(&format!("d{i}"), Decimal::from(1000 * (i as i64 + 1))))
        .collect()
}
