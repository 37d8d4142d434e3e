//! Sales deal records as supplied by the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::OpportunityId;

/// A sales opportunity to be scored.
///
/// Deals are immutable once handed to the aggregator for a batch. Dates are
/// kept as the caller's strings and forwarded verbatim to the prediction
/// service; an open deal typically has an empty `close_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Unique key within a batch.
    pub opportunity_id: OpportunityId,
    /// Owning sales agent.
    pub sales_agent: String,
    /// Product being sold.
    pub product: String,
    /// Customer account.
    pub account: String,
    /// Date the deal entered engagement.
    #[serde(default)]
    pub engage_date: String,
    /// Date the deal closed (or is expected to).
    #[serde(default)]
    pub close_date: String,
    /// Monetary value of the deal; never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub close_value: Decimal,
    /// Pipeline stage, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_stage: Option<String>,
}

impl Deal {
    /// Check the domain invariants of a supplied deal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyOpportunityId`] for a blank id and
    /// [`DomainError::NegativeCloseValue`] for a negative close value.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.opportunity_id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyOpportunityId);
        }
        if self.close_value.is_sign_negative() && !self.close_value.is_zero() {
            return Err(DomainError::NegativeCloseValue {
                opportunity_id: self.opportunity_id.to_string(),
                close_value: self.close_value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> Deal {
        Deal {
            opportunity_id: OpportunityId::new("1C1I7A6R"),
            sales_agent: "Moses Frase".into(),
            product: "GTX Plus Basic".into(),
            account: "Cancity".into(),
            engage_date: "2016-10-20".into(),
            close_date: "2017-03-01".into(),
            close_value: dec!(1054),
            deal_stage: Some("Won".into()),
        }
    }

    #[test]
    fn valid_deal_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn zero_close_value_is_allowed() {
        let deal = Deal {
            close_value: Decimal::ZERO,
            ..sample()
        };
        assert!(deal.validate().is_ok());
    }

    #[test]
    fn negative_close_value_is_rejected() {
        let deal = Deal {
            close_value: dec!(-1),
            ..sample()
        };
        assert!(matches!(
            deal.validate(),
            Err(DomainError::NegativeCloseValue { .. })
        ));
    }

    #[test]
    fn blank_id_is_rejected() {
        let deal = Deal {
            opportunity_id: OpportunityId::new("  "),
            ..sample()
        };
        assert!(matches!(
            deal.validate(),
            Err(DomainError::EmptyOpportunityId)
        ));
    }

    #[test]
    fn deserializes_numeric_close_value_and_optional_fields() {
        let json = r#"{
            "opportunity_id": "Z063OYW0",
            "sales_agent": "Darcel Schlecht",
            "product": "GTXPro",
            "account": "Isdom",
            "engage_date": "2016-10-25",
            "close_value": 4514.5
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.close_value, dec!(4514.5));
        assert_eq!(deal.close_date, "");
        assert_eq!(deal.deal_stage, None);
    }
}
