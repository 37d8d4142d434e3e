//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opportunity identifier - newtype for type safety.
///
/// Unique within a batch. Serializes as a bare string so it matches the
/// `opportunity_id` field of the prediction wire format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpportunityId(String);

impl OpportunityId {
    /// Create a new `OpportunityId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the opportunity ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OpportunityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for OpportunityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
