//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::{Config, CONFIG_TEMPLATE, SERVICE_URL_ENV};

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your service URL", path.display()));
    output::note(&format!(
        "2. Run: dealsight config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: dealsight check -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    if !path.exists() {
        output::note(&format!("{} not found, showing defaults", path.display()));
    }

    output::section("Prediction Service");
    output::field("Base URL", &config.service.base_url);
    output::field("Predict", config.service.predict_url());
    output::field("Recommend", config.service.recommend_url());
    output::field("Health", config.service.health_url());
    output::field("Timeout", format!("{}ms", config.service.timeout_ms));
    output::field("Connect", format!("{}ms", config.service.connect_timeout_ms));
    if std::env::var(SERVICE_URL_ENV).is_ok_and(|url| !url.trim().is_empty()) {
        output::note(&format!("base URL overridden by {SERVICE_URL_ENV}"));
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    if !output::is_json() {
        output::section("Config Validation");
        output::field("Path", path.display());
    }

    Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::success("Config file is valid");
    output::field(
        "Next",
        format!("dealsight config show -c {}", path.display()),
    );
    Ok(())
}
