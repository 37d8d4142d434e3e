//! Tests for configuration loading and validation.

use std::io::Write;

use dealsight::error::{ConfigError, Error};
use dealsight::infrastructure::config::settings::{Config, CONFIG_TEMPLATE};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn empty_file_loads_defaults() {
    let file = write_config("");
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.service.predict_url(), "http://127.0.0.1:8000/predict_deal");
    assert_eq!(config.service.timeout_ms, 10_000);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn template_loads_and_validates() {
    let file = write_config(CONFIG_TEMPLATE);
    assert!(Config::load(file.path()).is_ok());
}

#[test]
fn partial_service_section_keeps_other_defaults() {
    let file = write_config(
        r#"
[service]
base_url = "https://scoring.internal/v1/"
timeout_ms = 2500
"#,
    );
    let config = Config::load(file.path()).unwrap();

    assert_eq!(
        config.service.predict_url(),
        "https://scoring.internal/v1/predict_deal"
    );
    assert_eq!(config.service.health_url(), "https://scoring.internal/v1/health");
    assert_eq!(config.service.timeout_ms, 2500);
    assert_eq!(config.service.connect_timeout_ms, 2000);
}

#[test]
fn invalid_base_url_is_rejected() {
    let file = write_config("[service]\nbase_url = \"not a url\"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "base_url",
            ..
        }))
    ));
}

#[test]
fn empty_base_url_is_missing() {
    let file = write_config("[service]\nbase_url = \"\"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::MissingField { field: "base_url" }))
    ));
}

#[test]
fn zero_connect_timeout_is_rejected() {
    let file = write_config("[service]\nconnect_timeout_ms = 0\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "connect_timeout_ms",
            ..
        }))
    ));
}

#[test]
fn malformed_toml_is_parse_error() {
    let file = write_config("[service\nbase_url = ");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn load_or_default_tolerates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
}
