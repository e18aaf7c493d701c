use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::catalog::{Category, CategorySummary, Difficulty};
use crate::dashboard::Dashboard;
use crate::error::{McpError, McpResult, SessionError};
use crate::export::ExportColumn;
use crate::projection::FilterCriteria;
use crate::session::Priority;

/// Route tool calls to appropriate handlers
pub fn handle_tool_call(
    dashboard: &mut Dashboard,
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<Value> {
    info!(tool = %tool_name, "Routing tool call");

    match tool_name {
        // Read-only tools
        "dashboard_catalog" => handle_catalog(dashboard, arguments),
        "dashboard_view" => handle_view(dashboard, arguments),
        "dashboard_metrics" => serde_json::to_value(dashboard.metrics()).map_err(McpError::Json),
        "dashboard_record" => handle_record(dashboard, arguments),
        "dashboard_snapshot" => serde_json::to_value(dashboard.snapshot()).map_err(McpError::Json),
        // Session mutations
        "dashboard_set_completed" => handle_set_completed(dashboard, arguments),
        "dashboard_set_favorite" => handle_set_favorite(dashboard, arguments),
        "dashboard_set_priority" => handle_set_priority(dashboard, arguments),
        "dashboard_set_note" => handle_set_note(dashboard, arguments),
        "dashboard_complete_all" => handle_complete_all(dashboard, arguments),
        "dashboard_reset" => handle_reset(dashboard),
        // Reports
        "dashboard_export" => handle_export(dashboard, arguments),
        "dashboard_import" => handle_import(dashboard, arguments),
        _ => Err(McpError::UnknownTool {
            tool_name: tool_name.to_string(),
        }),
    }
}

// ============================================================================
// Parameter and response types
// ============================================================================

/// Parameters for dashboard_catalog.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    /// Category to list records for; all categories are summarized when unset.
    #[serde(default)]
    pub category: Option<String>,
}

/// Response for dashboard_catalog without a category.
#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    /// Category summaries in display order.
    pub categories: Vec<CategorySummary>,
    /// Total records across all categories.
    pub total: usize,
}

/// Parameters naming a single record.
#[derive(Debug, Deserialize)]
pub struct RecordParams {
    /// Automation name.
    pub name: String,
}

/// Parameters for dashboard_set_completed.
#[derive(Debug, Deserialize)]
pub struct SetCompletedParams {
    /// Automation name.
    pub name: String,
    /// New completion state.
    #[serde(default = "default_true")]
    pub completed: bool,
}

/// Parameters for dashboard_set_favorite.
#[derive(Debug, Deserialize)]
pub struct SetFavoriteParams {
    /// Automation name.
    pub name: String,
    /// New favorite state.
    #[serde(default = "default_true")]
    pub favorite: bool,
}

/// Parameters for dashboard_set_priority.
#[derive(Debug, Deserialize)]
pub struct SetPriorityParams {
    /// Automation name.
    pub name: String,
    /// New priority.
    pub priority: Priority,
}

/// Parameters for dashboard_set_note.
#[derive(Debug, Deserialize)]
pub struct SetNoteParams {
    /// Automation name.
    pub name: String,
    /// Note text; empty removes the note.
    #[serde(default)]
    pub note: String,
}

/// Parameters for dashboard_complete_all.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteAllParams {
    /// Only complete records of this difficulty.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Only complete records in this category.
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for dashboard_export.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    /// Restrict rows to a filtered view.
    #[serde(default)]
    pub criteria: Option<FilterCriteria>,
    /// Column headers overriding the configured list.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// Parameters for dashboard_import.
#[derive(Debug, Deserialize)]
pub struct ImportParams {
    /// CSV text of a previously exported report.
    pub content: String,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Handlers
// ============================================================================

fn handle_catalog(dashboard: &Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: CatalogParams = parse_optional_arguments("dashboard_catalog", arguments)?;

    match params.category {
        Some(name) => {
            let category: &Category = dashboard
                .catalog()
                .category(&name)
                .ok_or(SessionError::UnknownCategory { name })?;
            serde_json::to_value(category).map_err(McpError::Json)
        }
        None => {
            let catalog = dashboard.catalog();
            let response = CatalogListResponse {
                categories: catalog.summaries(),
                total: catalog.total_count(),
            };
            serde_json::to_value(response).map_err(McpError::Json)
        }
    }
}

fn handle_view(dashboard: &Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let criteria: FilterCriteria = parse_optional_arguments("dashboard_view", arguments)?;
    execute_handler(|| dashboard.view(&criteria))
}

fn handle_record(dashboard: &Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: RecordParams = parse_arguments("dashboard_record", arguments)?;
    execute_handler(|| dashboard.record(&params.name))
}

fn handle_set_completed(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: SetCompletedParams = parse_arguments("dashboard_set_completed", arguments)?;
    execute_handler(|| dashboard.set_completed(&params.name, params.completed))
}

fn handle_set_favorite(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: SetFavoriteParams = parse_arguments("dashboard_set_favorite", arguments)?;
    execute_handler(|| dashboard.set_favorite(&params.name, params.favorite))
}

fn handle_set_priority(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: SetPriorityParams = parse_arguments("dashboard_set_priority", arguments)?;
    execute_handler(|| dashboard.set_priority(&params.name, params.priority))
}

fn handle_set_note(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: SetNoteParams = parse_arguments("dashboard_set_note", arguments)?;
    execute_handler(|| dashboard.set_note(&params.name, &params.note))
}

fn handle_complete_all(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: CompleteAllParams = parse_optional_arguments("dashboard_complete_all", arguments)?;
    let added = dashboard.complete_all(params.difficulty, params.category.as_deref())?;

    Ok(json!({
        "newly_completed": added,
        "metrics": dashboard.metrics(),
    }))
}

fn handle_reset(dashboard: &mut Dashboard) -> McpResult<Value> {
    dashboard.reset();

    Ok(json!({
        "session_id": dashboard.session().id,
        "scope": dashboard.reset_scope(),
        "metrics": dashboard.metrics(),
    }))
}

fn handle_export(dashboard: &Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: ExportParams = parse_optional_arguments("dashboard_export", arguments)?;

    let columns = match params.columns {
        Some(headers) => Some(
            headers
                .iter()
                .map(|h| h.parse::<ExportColumn>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| McpError::InvalidParameters {
                    tool_name: "dashboard_export".to_string(),
                    message: e.to_string(),
                })?,
        ),
        None => None,
    };

    execute_handler(|| dashboard.export(params.criteria.as_ref(), columns.as_deref()))
}

fn handle_import(dashboard: &mut Dashboard, arguments: Option<Value>) -> McpResult<Value> {
    let params: ImportParams = parse_arguments("dashboard_import", arguments)?;
    let report = dashboard.import(&params.content)?;

    Ok(json!({
        "applied": report.applied,
        "skipped": report.skipped,
        "metrics": dashboard.metrics(),
    }))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Helper to parse arguments with consistent error handling
fn parse_arguments<T: serde::de::DeserializeOwned>(
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<T> {
    match arguments {
        Some(args) => serde_json::from_value(args).map_err(|e| McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: e.to_string(),
        }),
        None => Err(McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: "Missing arguments".to_string(),
        }),
    }
}

/// Like [`parse_arguments`], but missing arguments mean "all defaults".
fn parse_optional_arguments<T: serde::de::DeserializeOwned + Default>(
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<T> {
    match arguments {
        Some(Value::Null) | None => Ok(T::default()),
        Some(args) => parse_arguments(tool_name, Some(args)),
    }
}

/// Run a dashboard operation and serialize its result.
///
/// Operation errors become `ExecutionFailed`, which the server reports as
/// an `isError` tool result rather than a protocol error.
fn execute_handler<R, E, F>(operation: F) -> McpResult<Value>
where
    R: Serialize,
    E: std::fmt::Display,
    F: FnOnce() -> Result<R, E>,
{
    let result = operation().map_err(|e| McpError::ExecutionFailed {
        message: e.to_string(),
    })?;

    serde_json::to_value(result).map_err(McpError::Json)
}
