//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides. Config::from_env() also loads a .env
//! file via dotenvy, so every test sets the variables it depends on.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use cleaning_automation_hub::config::{Config, LogFormat};
use cleaning_automation_hub::export::ExportColumn;
use cleaning_automation_hub::session::ResetScope;
use serial_test::serial;
use std::env;
use std::io::Write;

const VARS: [&str; 6] = [
    "LOG_LEVEL",
    "LOG_FORMAT",
    "CATALOG_PATH",
    "RESET_SCOPE",
    "EXPORT_COLUMNS",
    "EXPORT_DIR",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_vars();

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.catalog.path.is_none());
    assert_eq!(config.session.reset_scope, ResetScope::Everything);
    assert_eq!(config.export.columns, ExportColumn::ALL.to_vec());
    assert_eq!(config.export.dir.to_str().unwrap(), ".");
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    clear_vars();
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("LOG_LEVEL", "debug");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "debug");

    clear_vars();
}

#[test]
#[serial]
fn test_config_unknown_log_format_falls_back_to_pretty() {
    clear_vars();
    env::set_var("LOG_FORMAT", "xml");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Pretty);

    clear_vars();
}

#[test]
#[serial]
fn test_config_reset_scope() {
    clear_vars();
    env::set_var("RESET_SCOPE", "progress");

    let config = Config::from_env().unwrap();
    assert_eq!(config.session.reset_scope, ResetScope::ProgressOnly);

    env::set_var("RESET_SCOPE", "sometimes");
    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("RESET_SCOPE"));

    clear_vars();
}

#[test]
#[serial]
fn test_config_export_columns() {
    clear_vars();
    env::set_var("EXPORT_COLUMNS", "automation, status,Notes");
    env::set_var("EXPORT_DIR", "/tmp/reports");

    let config = Config::from_env().unwrap();
    assert_eq!(
        config.export.columns,
        vec![
            ExportColumn::Automation,
            ExportColumn::Status,
            ExportColumn::Notes
        ]
    );
    assert_eq!(config.export.dir.to_str().unwrap(), "/tmp/reports");

    clear_vars();
}

#[test]
#[serial]
fn test_config_invalid_export_columns() {
    clear_vars();
    env::set_var("EXPORT_COLUMNS", "Automation,Colour");
    assert!(Config::from_env().is_err());

    env::set_var("EXPORT_COLUMNS", " , ");
    assert!(Config::from_env().is_err());

    clear_vars();
}

#[test]
#[serial]
fn test_config_catalog_path() {
    clear_vars();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name": "Windows", "icon": "🪟", "items": ["Quote window jobs from photos"]}}]"#
    )
    .unwrap();
    env::set_var("CATALOG_PATH", file.path());

    let config = Config::from_env().unwrap();
    assert_eq!(config.catalog.path.as_deref(), Some(file.path()));

    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.total_count(), 1);
    assert!(catalog.contains("Quote window jobs from photos"));

    clear_vars();
}

#[test]
#[serial]
fn test_config_missing_catalog_file() {
    clear_vars();
    env::set_var("CATALOG_PATH", "/nonexistent/catalog.json");

    let config = Config::from_env().unwrap();
    assert!(config.load_catalog().is_err());

    clear_vars();
}

#[test]
#[serial]
fn test_config_builtin_catalog_when_unset() {
    clear_vars();

    let catalog = Config::from_env().unwrap().load_catalog().unwrap();
    assert_eq!(catalog.total_count(), 100);
}
