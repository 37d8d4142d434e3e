//! Handler for the `check` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{self, output};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::prediction::build_prediction_service;

/// Probe the prediction service health endpoint.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    cli::init_logging(&config);
    let service = build_prediction_service(&config)?;
    let health_url = config.service.health_url();

    if !output::is_json() {
        output::section("Service Check");
        output::field("Service", &config.service.base_url);
        output::field("Health", &health_url);
    }

    let pb = output::spinner("Checking prediction service...");
    match service.health().await {
        Ok(()) => {
            output::spinner_success(&pb, "Prediction service is healthy");
            if output::is_json() {
                output::json_output(json!({
                    "command": "check",
                    "status": "healthy",
                    "url": health_url,
                }));
            }
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Prediction service is unreachable");
            if output::is_json() {
                output::json_output(json!({
                    "command": "check",
                    "status": "unhealthy",
                    "url": health_url,
                    "details": e.to_string(),
                }));
            } else {
                output::hint(&format!(
                    "set {} or edit {}",
                    crate::infrastructure::config::settings::SERVICE_URL_ENV,
                    config_path.display()
                ));
            }
            Err(e)
        }
    }
}
