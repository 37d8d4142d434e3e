//! Handler for the `score` command.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::{self, deals, output};
use crate::application::aggregator::BatchStatus;
use crate::application::row::{BarColor, RowViewModel};
use crate::application::session::PredictionSession;
use crate::domain::PredictionOutcome;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::prediction::build_prediction_service;

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Opportunity")]
    opportunity: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Win")]
    win: String,
    #[tabled(rename = "Risk")]
    risk: String,
}

impl ScoreRow {
    fn from_view(row: &RowViewModel) -> Self {
        Self {
            opportunity: row.deal.opportunity_id.to_string(),
            account: row.deal.account.clone(),
            agent: row.deal.sales_agent.clone(),
            product: row.deal.product.clone(),
            value: format_value(row.deal.close_value),
            win: row.label(),
            risk: output::risk_bar(row),
        }
    }
}

/// One JSON line per row under `--json`.
#[derive(Serialize)]
struct RowRecord<'a> {
    opportunity_id: &'a str,
    label: String,
    display_percent: Option<i64>,
    bar_width: String,
    bar_color: BarColor,
    tooltip: String,
    outcome: Option<&'a PredictionOutcome>,
}

impl<'a> RowRecord<'a> {
    fn from_view(row: &'a RowViewModel) -> Self {
        Self {
            opportunity_id: row.deal.opportunity_id.as_str(),
            label: row.label(),
            display_percent: row.display_percent,
            bar_width: row.bar_width(),
            bar_color: row.bar_color,
            tooltip: row.tooltip(),
            outcome: row.outcome.as_ref(),
        }
    }
}

/// Currency symbol prefixed to close values.
const CURRENCY: &str = "£";

/// Close value rounded to pence, e.g. `£1054.26`.
pub(super) fn format_value(value: Decimal) -> String {
    format!("{CURRENCY}{}", value.round_dp(2))
}

/// Execute `score`.
pub async fn execute(deals_path: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    cli::init_logging(&config);
    let deals = deals::load_deals(deals_path)?;
    let service = build_prediction_service(&config)?;
    let session = PredictionSession::new(service);

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
    }
    let pb = output::spinner(&format!("Scoring {} deals...", deals.len()));
    let status = session
        .supply(deals)
        .await
        .map_err(|e| Error::Connection(format!("scoring task failed: {e}")))?;

    let rows = session.rows();
    match &status {
        BatchStatus::Published(summary) => output::spinner_success(
            &pb,
            &format!(
                "Scored {} deals ({} ok, {} failed)",
                summary.requested, summary.succeeded, summary.failed
            ),
        ),
        BatchStatus::Stale { .. } => output::spinner_fail(&pb, "Scoring was superseded"),
    }

    if output::is_json() {
        for row in &rows {
            output::json_output(serde_json::to_value(RowRecord::from_view(row))?);
        }
        return Ok(());
    }

    if output::is_quiet() {
        return Ok(());
    }

    if rows.is_empty() {
        output::note("(no deals)");
        return Ok(());
    }

    let table = Table::new(rows.iter().map(ScoreRow::from_view)).to_string();
    output::lines(&table);

    if let Some(summary) = status.summary() {
        if summary.failed > 0 {
            output::warning(&format!(
                "{} predictions failed; those rows show no probability",
                summary.failed
            ));
            if output::verbosity() > 0 {
                for row in &rows {
                    if let Some(err) = row.outcome.as_ref().and_then(PredictionOutcome::failure) {
                        output::field(row.deal.opportunity_id.as_str(), err);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::application::state::AggregationState;
    use crate::testkit::domain::deal;

    #[test]
    fn formats_value_in_pounds() {
        assert_eq!(format_value(dec!(50000)), "£50000");
        assert_eq!(format_value(dec!(1054.256)), "£1054.26");
    }

    #[test]
    fn pending_record_has_no_percent() {
        let row = RowViewModel::project(&deal("1", dec!(10)), &AggregationState::new());
        let value = serde_json::to_value(RowRecord::from_view(&row)).unwrap();

        assert_eq!(value["opportunity_id"], "1");
        assert_eq!(value["label"], "—");
        assert_eq!(value["bar_width"], "0%");
        assert_eq!(value["bar_color"], "transparent");
        assert!(value["display_percent"].is_null());
        assert!(value["outcome"].is_null());
    }
}
