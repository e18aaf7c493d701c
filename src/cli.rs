//! Command-line interface.
//!
//! The default command serves the dashboard over stdio; the others are
//! one-shot commands that run against a fresh session and exit.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::{Difficulty, RoiPotential};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::projection::{FilterCriteria, Projection};

/// Cleaning business automation tracker.
#[derive(Parser, Debug)]
#[command(name = "cleaning-automation-hub", version)]
#[command(about = "Track automation ideas for a cleaning business")]
#[command(
    after_help = "Environment:\n  LOG_LEVEL        Log filter when RUST_LOG is unset (default: info)\n  LOG_FORMAT       pretty or json\n  CATALOG_PATH     JSON catalog replacing the built-in one\n  RESET_SCOPE      everything or progress\n  EXPORT_COLUMNS   Comma-separated report columns\n  EXPORT_DIR       Directory for exported reports"
)]
pub struct Cli {
    /// Command to run (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Serve the dashboard as a JSON-RPC tool server on stdio
    Serve,

    /// List categories, or the automations in one category
    Catalog {
        /// Category to list
        #[arg(long)]
        category: Option<String>,
    },

    /// Search the catalog
    Search {
        /// Text to find in automation names and descriptions
        term: Option<String>,

        /// Only show this difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Only show this ROI potential (high, medium, low)
        #[arg(long)]
        roi: Option<RoiPotential>,

        /// Only search this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Write a progress report for a fresh session
    Export {
        /// Output file (defaults to EXPORT_DIR with a dated filename)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Result of CLI command execution.
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

/// Execute a one-shot CLI command.
///
/// `Serve` is handled by the binary and is rejected here.
pub fn execute_command(command: Commands, dashboard: &Dashboard, config: &Config) -> CliResult {
    match command {
        Commands::Serve => CliResult::error("serve is not a one-shot command"),
        Commands::Catalog { category } => execute_catalog(dashboard, category.as_deref()),
        Commands::Search {
            term,
            difficulty,
            roi,
            category,
        } => {
            let mut criteria = FilterCriteria::new().with_search(term.unwrap_or_default());
            if let Some(difficulty) = difficulty {
                criteria = criteria.with_difficulty(difficulty);
            }
            if let Some(roi) = roi {
                criteria = criteria.with_roi(roi);
            }
            if let Some(category) = category {
                criteria = criteria.with_categories([category]);
            }
            execute_search(dashboard, &criteria)
        }
        Commands::Export { output } => execute_export(dashboard, config, output.as_deref()),
    }
}

fn execute_catalog(dashboard: &Dashboard, category: Option<&str>) -> CliResult {
    let catalog = dashboard.catalog();
    let mut output = String::new();

    match category {
        Some(name) => {
            let Some(category) = catalog.category(name) else {
                return CliResult::error(format!("Unknown category: {}", name));
            };
            output.push_str(&format!(
                "{} {} ({} automations)\n\n",
                category.icon,
                category.name,
                category.item_count()
            ));
            for record in &category.items {
                output.push_str(&format!(
                    "  {}\n    {} | {} | ROI {} | {}\n",
                    record.name,
                    record.difficulty,
                    display_or_dash(&record.time_estimate),
                    record.roi_potential,
                    display_or_dash(&record.cost_estimate),
                ));
            }
        }
        None => {
            for summary in catalog.summaries() {
                output.push_str(&format!(
                    "{} {:<32} {:>3}\n",
                    summary.icon, summary.name, summary.item_count
                ));
            }
            output.push_str(&format!(
                "\n{} automations in {} categories\n",
                catalog.total_count(),
                catalog.category_count()
            ));
        }
    }

    CliResult::success(output)
}

fn execute_search(dashboard: &Dashboard, criteria: &FilterCriteria) -> CliResult {
    match dashboard.view(criteria) {
        Ok(projection) => CliResult::success(format_projection(&projection)),
        Err(e) => CliResult::error(e.to_string()),
    }
}

fn execute_export(dashboard: &Dashboard, config: &Config, output: Option<&Path>) -> CliResult {
    let report = match dashboard.export(None, None) {
        Ok(report) => report,
        Err(e) => return CliResult::error(e.to_string()),
    };

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config.export.dir.join(&report.filename),
    };

    match report.write_to(&path) {
        Ok(()) => CliResult::success(format!(
            "Wrote {} rows to {}",
            report.rows,
            path.display()
        )),
        Err(e) => CliResult::error(format!("Failed to write {}: {}", path.display(), e)),
    }
}

fn format_projection(projection: &Projection) -> String {
    let mut output = String::new();

    if projection.visible_count == 0 {
        output.push_str("No automations match your filters.\n");
        return output;
    }

    for category in &projection.categories {
        output.push_str(&format!(
            "{} {} ({}/{} done)\n",
            category.icon, category.name, category.progress.completed, category.progress.total
        ));
        for view in &category.records {
            let mark = if view.completed { "x" } else { " " };
            output.push_str(&format!(
                "  [{}] {} ({}, ROI {})\n",
                mark, view.record.name, view.record.difficulty, view.record.roi_potential
            ));
        }
    }
    output.push_str(&format!("\n{} matching automations\n", projection.visible_count));
    output
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn test_cli_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["cleaning-automation-hub"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_search_filters() {
        let cli = Cli::try_parse_from([
            "cleaning-automation-hub",
            "search",
            "geo",
            "--difficulty",
            "hard",
            "--roi",
            "High",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Search {
                term: Some("geo".to_string()),
                difficulty: Some(Difficulty::Hard),
                roi: Some(RoiPotential::High),
                category: None,
            })
        );
    }

    #[test]
    fn test_cli_rejects_bad_difficulty() {
        assert!(Cli::try_parse_from(["cleaning-automation-hub", "search", "--difficulty", "trivial"]).is_err());
    }

    #[test]
    fn test_catalog_summary() {
        let result = execute_command(Commands::Catalog { category: None }, &dashboard(), &Config::default());
        assert_eq!(result.exit_code, 0);
        assert!(result.message.contains("100 automations in 7 categories"));
    }

    #[test]
    fn test_catalog_unknown_category() {
        let result = execute_command(
            Commands::Catalog {
                category: Some("Laundry".to_string()),
            },
            &dashboard(),
            &Config::default(),
        );
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn test_search_geo() {
        let result = execute_command(
            Commands::Search {
                term: Some("geo".to_string()),
                difficulty: None,
                roi: None,
                category: None,
            },
            &dashboard(),
            &Config::default(),
        );
        assert_eq!(result.exit_code, 0);
        assert!(result.message.contains("Geofence tracking for mobile crews"));
        assert!(result.message.contains("2 matching automations"));
        assert!(!result.message.contains("Send weekly schedule"));
    }

    #[test]
    fn test_search_without_matches() {
        let result = execute_command(
            Commands::Search {
                term: Some("zzz-no-match".to_string()),
                difficulty: None,
                roi: None,
                category: None,
            },
            &dashboard(),
            &Config::default(),
        );
        assert_eq!(result.exit_code, 0);
        assert!(result.message.contains("No automations match"));
    }

    #[test]
    fn test_serve_is_not_one_shot() {
        let result = execute_command(Commands::Serve, &dashboard(), &Config::default());
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn test_cli_result_success() {
        let result = CliResult::success("ok");
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.message, "ok");
    }
}
