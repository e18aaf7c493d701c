//! Progress report export/import tests against the built-in catalog.

use std::sync::Arc;

use cleaning_automation_hub::catalog::Catalog;
use cleaning_automation_hub::cli::{execute_command, Commands};
use cleaning_automation_hub::config::Config;
use cleaning_automation_hub::error::ExportError;
use cleaning_automation_hub::export::{csv, ExportColumn};
use cleaning_automation_hub::projection::{FilterCriteria, StatusFilter};
use cleaning_automation_hub::session::Priority;
use cleaning_automation_hub::Dashboard;
use pretty_assertions::assert_eq;

fn builtin_dashboard() -> Dashboard {
    Dashboard::new(Arc::new(Catalog::builtin()))
}

#[test]
fn test_full_export_has_header_and_every_record() {
    let dashboard = builtin_dashboard();
    let report = dashboard.export(None, None).unwrap();

    let rows = csv::parse(&report.content).unwrap();
    assert_eq!(rows.len(), 101);
    assert_eq!(
        rows[0],
        ExportColumn::ALL
            .iter()
            .map(|c| c.header().to_string())
            .collect::<Vec<_>>()
    );
    assert!(rows[1..].iter().all(|r| r.len() == ExportColumn::ALL.len()));
    assert!(report.filename.starts_with("cleaning_automations_progress_"));
    assert!(report.filename.ends_with(".csv"));
}

#[test]
fn test_export_of_empty_filter_is_header_only() {
    let dashboard = builtin_dashboard();
    let criteria = FilterCriteria::new().with_status(StatusFilter::Completed);
    let report = dashboard.export(Some(&criteria), None).unwrap();

    assert_eq!(report.rows, 0);
    assert_eq!(csv::parse(&report.content).unwrap().len(), 1);
}

#[test]
fn test_round_trip_preserves_annotations() {
    let mut original = builtin_dashboard();
    let names: Vec<String> = original
        .catalog()
        .record_names()
        .step_by(7)
        .map(str::to_string)
        .collect();

    for (i, name) in names.iter().enumerate() {
        original.set_completed(name, i % 2 == 0).unwrap();
        original.set_favorite(name, i % 3 == 0).unwrap();
        let priority = match i % 3 {
            0 => Priority::High,
            1 => Priority::Medium,
            _ => Priority::Low,
        };
        original.set_priority(name, priority).unwrap();
        original
            .set_note(name, &format!("note {}, with \"quotes\"\nand a second line", i))
            .unwrap();
    }

    let report = original.export(None, None).unwrap();

    let mut restored = builtin_dashboard();
    let outcome = restored.import(&report.content).unwrap();
    assert_eq!(outcome.applied, 100);
    assert!(outcome.skipped.is_empty());

    for name in original.catalog().record_names() {
        let a = original.record(name).unwrap();
        let b = restored.record(name).unwrap();
        assert_eq!(a.completed, b.completed, "{}", name);
        assert_eq!(a.favorite, b.favorite, "{}", name);
        assert_eq!(a.priority, b.priority, "{}", name);
        assert_eq!(a.note, b.note, "{}", name);
    }
    assert_eq!(restored.state().priorities(), original.state().priorities());
}

#[test]
fn test_import_from_smaller_catalog_report() {
    let mut dashboard = builtin_dashboard();
    let text = "Automation,Status,Priority\n\
                Geofence tracking for mobile crews,Completed,High\n\
                Retired automation,Completed,Low\n";

    let outcome = dashboard.import(text).unwrap();
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped, vec!["Retired automation".to_string()]);
    assert_eq!(dashboard.metrics().completed, 1);
}

#[test]
fn test_import_malformed_csv() {
    let mut dashboard = builtin_dashboard();
    let err = dashboard
        .import("Automation,Notes\nGeofence tracking for mobile crews,\"unterminated\n")
        .unwrap_err();
    assert!(matches!(err, ExportError::Malformed { .. }));
    assert!(dashboard.state().is_empty());
}

#[test]
fn test_cli_export_writes_into_export_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.export.dir = dir.path().to_path_buf();
    config.export.columns = vec![ExportColumn::Category, ExportColumn::Automation];

    let dashboard = Dashboard::from_config(Arc::new(Catalog::builtin()), &config);
    let result = execute_command(Commands::Export { output: None }, &dashboard, &config);
    assert_eq!(result.exit_code, 0, "{}", result.message);

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let content = std::fs::read_to_string(&entries[0]).unwrap();
    assert!(content.starts_with("Category,Automation\n"));
    assert_eq!(content.lines().count(), 101);
}

#[test]
fn test_cli_export_to_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.csv");
    let config = Config::default();

    let dashboard = builtin_dashboard();
    let result = execute_command(
        Commands::Export {
            output: Some(path.clone()),
        },
        &dashboard,
        &config,
    );
    assert_eq!(result.exit_code, 0);
    assert!(result.message.contains("100 rows"));
    assert!(path.exists());
}

#[test]
fn test_cli_export_to_missing_directory_fails() {
    let config = Config::default();
    let dashboard = builtin_dashboard();
    let result = execute_command(
        Commands::Export {
            output: Some("/nonexistent/dir/progress.csv".into()),
        },
        &dashboard,
        &config,
    );
    assert_eq!(result.exit_code, 1);
}
