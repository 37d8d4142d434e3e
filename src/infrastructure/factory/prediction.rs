//! Prediction service factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::scoring::HttpPredictionClient;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::prediction::PredictionService;

/// Build the prediction service client from configuration.
///
/// # Errors
///
/// Returns an error if the configured service URLs do not parse.
pub fn build_prediction_service(config: &Config) -> Result<Arc<dyn PredictionService>> {
    let client = HttpPredictionClient::from_config(&config.service)?;
    info!(
        service = client.name(),
        url = %client.predict_url(),
        timeout_ms = config.service.timeout_ms,
        "Prediction client initialized"
    );
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_http_client_from_default_config() {
        let service = build_prediction_service(&Config::default()).unwrap();
        assert_eq!(service.name(), "http");
    }
}
