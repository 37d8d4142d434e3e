//! Handler for the `recommend` command.

use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled};

use super::score::format_value;
use crate::adapter::inbound::cli::{self, deals, output};
use crate::application::recommend::{recommend_all, DealAdvice};
use crate::domain::RecommendationOutcome;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::prediction::build_prediction_service;

#[derive(Tabled)]
struct AdviceRow {
    #[tabled(rename = "Opportunity")]
    opportunity: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl AdviceRow {
    fn from_advice(advice: &DealAdvice) -> Self {
        let (action, confidence) = match advice.outcome.recommendation() {
            Some(r) => (r.action.clone(), r.confidence_label()),
            None => ("—".to_string(), String::new()),
        };
        Self {
            opportunity: advice.deal.opportunity_id.to_string(),
            account: advice.deal.account.clone(),
            value: format_value(advice.deal.close_value),
            action,
            confidence,
        }
    }
}

/// One JSON line per deal under `--json`.
#[derive(Serialize)]
struct AdviceRecord<'a> {
    opportunity_id: &'a str,
    #[serde(flatten)]
    outcome: &'a RecommendationOutcome,
}

/// Execute `recommend`.
pub async fn execute(deals_path: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    cli::init_logging(&config);
    let deals = deals::load_deals(deals_path)?;
    let service = build_prediction_service(&config)?;

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
    }
    let pb = output::spinner(&format!("Asking for advice on {} deals...", deals.len()));
    let advice = recommend_all(&service, &deals).await;
    let failed = advice
        .iter()
        .filter(|a| a.outcome.failure().is_some())
        .count();
    output::spinner_success(
        &pb,
        &format!("Advised on {} deals ({failed} failed)", advice.len()),
    );

    if output::is_json() {
        for item in &advice {
            output::json_output(serde_json::to_value(AdviceRecord {
                opportunity_id: item.deal.opportunity_id.as_str(),
                outcome: &item.outcome,
            })?);
        }
        return Ok(());
    }

    if output::is_quiet() {
        return Ok(());
    }

    if advice.is_empty() {
        output::note("(no deals)");
        return Ok(());
    }

    output::lines(&Table::new(advice.iter().map(AdviceRow::from_advice)).to_string());

    if failed > 0 {
        output::warning(&format!("{failed} recommendations failed"));
        if output::verbosity() > 0 {
            for item in &advice {
                if let Some(err) = item.outcome.failure() {
                    output::field(item.deal.opportunity_id.as_str(), err);
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
    use crate::domain::Recommendation;
    use crate::error::PredictionError;
    use crate::testkit::domain::deal;

    #[test]
    fn failed_row_has_placeholder_action() {
        let advice = DealAdvice {
            deal: deal("1", dec!(10)),
            outcome: RecommendationOutcome::from_result(Err(PredictionError::transport())),
        };
        let row = AdviceRow::from_advice(&advice);

        assert_eq!(row.action, "—");
        assert!(row.confidence.is_empty());
    }

    #[test]
    fn record_carries_status_and_recommendation() {
        let outcome =
            RecommendationOutcome::from_result(Ok(Recommendation::new("Schedule demo", 0.61)));
        let value = serde_json::to_value(AdviceRecord {
            opportunity_id: "7",
            outcome: &outcome,
        })
        .unwrap();

        assert_eq!(value["opportunity_id"], "7");
        assert_eq!(value["status"], "success");
        assert_eq!(value["recommendation"]["action"], "Schedule demo");
    }
}
