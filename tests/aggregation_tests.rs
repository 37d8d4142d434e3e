//! End-to-end scoring: deals through the HTTP client into display rows.

mod support;

use std::sync::Arc;

use dealsight::adapter::outbound::scoring::HttpPredictionClient;
use dealsight::application::row::{BarColor, PENDING_LABEL};
use dealsight::application::{Liveness, PredictionAggregator, PredictionSession};
use dealsight::domain::{color_for, PredictionOutcome};
use dealsight::error::PredictionError;
use dealsight::testkit::domain::{deal, make_deals, opportunity};
use dealsight::testkit::service::ScriptedPredictionService;
use rust_decimal_macros::dec;
use support::{closed_port_url, spawn_scoring_stub};

#[tokio::test]
async fn session_renders_rows_from_live_service() {
    let stub = spawn_scoring_stub(&[("1", 0.73), ("2", 0.1)]).await;
    let client = HttpPredictionClient::new(&stub.base_url).unwrap();
    let session = PredictionSession::new(Arc::new(client));

    let status = session
        .supply(vec![
            deal("1", dec!(50000)),
            deal("2", dec!(1200)),
            deal("3", dec!(10)),
        ])
        .await
        .unwrap();

    let summary = status.summary().unwrap();
    assert_eq!(summary.requested, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    let rows = session.rows();
    assert_eq!(rows[0].label(), "73%");
    assert_eq!(rows[0].bar_width(), "73%");
    assert_eq!(rows[0].bar_color, BarColor::Rgb(color_for(0.27)));
    assert_eq!(rows[1].label(), "10%");
    assert_eq!(rows[2].label(), PENDING_LABEL);
    assert_eq!(rows[2].bar_color, BarColor::Transparent);
    assert_eq!(
        rows[2].outcome,
        Some(PredictionOutcome::Failure {
            error: PredictionError::Service { status_code: 500 },
        })
    );
    assert_eq!(stub.hits(), 3);
}

#[tokio::test]
async fn unreachable_service_fails_every_deal_and_clears_loading() {
    let client = HttpPredictionClient::new(&closed_port_url().await).unwrap();
    let aggregator = PredictionAggregator::new(Arc::new(client));

    let status = aggregator.run(make_deals(3), &Liveness::new()).await;

    assert!(status.is_published());
    assert!(!aggregator.is_loading());
    let state = aggregator.snapshot();
    assert_eq!(state.len(), 3);
    for outcome in state.outcomes().values() {
        assert_eq!(outcome.failure(), Some(&PredictionError::transport()));
    }
}

#[tokio::test]
async fn replacing_input_drops_rows_of_previous_deals() {
    let service = Arc::new(ScriptedPredictionService::new().probability("keep", 0.2));
    let session = PredictionSession::new(service.clone());

    session
        .supply(vec![deal("gone", dec!(1)), deal("keep", dec!(2))])
        .await
        .unwrap();
    session.supply(vec![deal("keep", dec!(2))]).await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.len(), 1);
    assert!(state.outcome(&opportunity("gone")).is_none());
    assert_eq!(session.rows()[0].label(), "20%");
    assert_eq!(service.calls_for("keep"), 2);
}

#[tokio::test]
async fn subscriber_is_notified_when_rows_change() {
    let service = Arc::new(ScriptedPredictionService::new());
    let session = PredictionSession::new(service);
    let mut updates = session.subscribe();

    let handle = session.supply(make_deals(2));
    updates.changed().await.unwrap();
    handle.await.unwrap();

    assert!(session.rows().iter().all(|row| row.label() == "50%"));
}
