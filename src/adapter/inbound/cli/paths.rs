//! Path utilities for dealsight.
//!
//! All data lives under `~/.dealsight/`:
//! - `~/.dealsight/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the dealsight home directory (`~/.dealsight/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dealsight")
}

/// Returns the default config file path (`~/.dealsight/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
