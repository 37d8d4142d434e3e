//! Row projection for rendering.
//!
//! Rows are a pure function of the supplied deals and the current
//! [`AggregationState`]; they are rebuilt on demand and never stored.
//! A failed prediction renders exactly like one that is still pending.

use std::fmt;

use serde::{Serialize, Serializer};

use super::state::AggregationState;
use crate::domain::{color_for, Deal, PredictionOutcome, Rgb};

/// Label shown when no probability is available.
pub const PENDING_LABEL: &str = "—";

/// Tooltip shown when no probability is available.
pub const PENDING_TOOLTIP: &str = "No prediction";

/// Fill color of a risk bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Transparent,
    Rgb(Rgb),
}

impl fmt::Display for BarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Rgb(rgb) => write!(f, "{rgb}"),
        }
    }
}

impl Serialize for BarColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything a renderer needs for one deal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowViewModel {
    pub deal: Deal,
    /// `None` while pending, after a discarded batch, or for ids missing
    /// from the published map.
    pub outcome: Option<PredictionOutcome>,
    /// `round(win_probability * 100)`, only for successful predictions.
    pub display_percent: Option<i64>,
    pub bar_color: BarColor,
}

impl RowViewModel {
    /// Project one deal against the current state.
    #[must_use]
    pub fn project(deal: &Deal, state: &AggregationState) -> Self {
        let outcome = state.outcome(&deal.opportunity_id).cloned();
        let win_probability = outcome.as_ref().and_then(PredictionOutcome::win_probability);

        let (display_percent, bar_color) = match win_probability {
            Some(p) => (
                Some(percent(p)),
                BarColor::Rgb(color_for(1.0 - p)),
            ),
            None => (None, BarColor::Transparent),
        };

        Self {
            deal: deal.clone(),
            outcome,
            display_percent,
            bar_color,
        }
    }

    /// Percentage label, e.g. `73%`, or [`PENDING_LABEL`].
    #[must_use]
    pub fn label(&self) -> String {
        self.display_percent
            .map_or_else(|| PENDING_LABEL.to_string(), |pct| format!("{pct}%"))
    }

    /// CSS width of the risk bar, e.g. `73%`, or `0%`.
    #[must_use]
    pub fn bar_width(&self) -> String {
        format!("{}%", self.display_percent.unwrap_or(0))
    }

    /// Hover text for the risk bar.
    #[must_use]
    pub fn tooltip(&self) -> String {
        self.display_percent
            .map_or_else(|| PENDING_TOOLTIP.to_string(), |pct| format!("Win {pct}%"))
    }
}

/// Project every deal, in input order.
#[must_use]
pub fn assemble_rows(deals: &[Deal], state: &AggregationState) -> Vec<RowViewModel> {
    deals
        .iter()
        .map(|deal| RowViewModel::project(deal, state))
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn percent(win_probability: f64) -> i64 {
    (win_probability * 100.0).round() as i64
}
