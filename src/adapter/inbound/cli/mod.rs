//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod deals;
pub mod output;
pub mod paths;
pub mod recommend;
pub mod score;

use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Initialize logging for a CLI command.
///
/// Without `-v` only warnings reach stderr; `-v` uses the configured level
/// and `-vv` or more forces `debug`. `RUST_LOG` still wins.
pub fn init_logging(config: &Config) {
    let level = match output::verbosity() {
        0 => "warn".to_string(),
        1 => config.logging.level.clone(),
        _ => "debug".to_string(),
    };
    LoggingConfig {
        level,
        format: config.logging.format.clone(),
    }
    .init();
}
