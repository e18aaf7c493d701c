//! Progress report export and import.
//!
//! Reports are CSV with one row per automation. The column list is
//! configurable; the header row is always written, so a report with no
//! matching automations is still a well-formed table.

pub mod csv;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{ExportError, ExportResult};
use crate::projection::{project, FilterCriteria, Projection, RecordView};
use crate::session::{Priority, SessionState};

/// A column of the progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportColumn {
    /// Owning category name.
    Category,
    /// Automation name.
    Automation,
    /// `Completed` or `Pending`.
    Status,
    /// Session priority.
    Priority,
    /// Catalog difficulty.
    Difficulty,
    /// Setup time estimate.
    TimeEstimate,
    /// Running cost estimate.
    CostEstimate,
    /// ROI potential.
    RoiPotential,
    /// Tools joined with `", "`.
    Tools,
    /// Session note.
    Notes,
    /// `Yes` or `No`.
    Favorite,
    /// When the report was generated.
    ExportedAt,
}

impl ExportColumn {
    /// Every column in default report order.
    pub const ALL: [ExportColumn; 12] = [
        ExportColumn::Category,
        ExportColumn::Automation,
        ExportColumn::Status,
        ExportColumn::Priority,
        ExportColumn::Difficulty,
        ExportColumn::TimeEstimate,
        ExportColumn::CostEstimate,
        ExportColumn::RoiPotential,
        ExportColumn::Tools,
        ExportColumn::Notes,
        ExportColumn::Favorite,
        ExportColumn::ExportedAt,
    ];

    /// Header text for this column.
    pub fn header(&self) -> &'static str {
        match self {
            ExportColumn::Category => "Category",
            ExportColumn::Automation => "Automation",
            ExportColumn::Status => "Status",
            ExportColumn::Priority => "Priority",
            ExportColumn::Difficulty => "Difficulty",
            ExportColumn::TimeEstimate => "Time_Estimate",
            ExportColumn::CostEstimate => "Cost_Estimate",
            ExportColumn::RoiPotential => "ROI_Potential",
            ExportColumn::Tools => "Tools",
            ExportColumn::Notes => "Notes",
            ExportColumn::Favorite => "Favorite",
            ExportColumn::ExportedAt => "Exported_At",
        }
    }

    fn cell(&self, category: &str, view: &RecordView, exported_at: &str) -> String {
        let record = &view.record;
        match self {
            ExportColumn::Category => category.to_string(),
            ExportColumn::Automation => record.name.clone(),
            ExportColumn::Status => String::from(if view.completed { "Completed" } else { "Pending" }),
            ExportColumn::Priority => view.priority.to_string(),
            ExportColumn::Difficulty => record.difficulty.to_string(),
            ExportColumn::TimeEstimate => record.time_estimate.clone(),
            ExportColumn::CostEstimate => record.cost_estimate.clone(),
            ExportColumn::RoiPotential => record.roi_potential.to_string(),
            ExportColumn::Tools => record.tools.join(", "),
            ExportColumn::Notes => view.note.clone(),
            ExportColumn::Favorite => String::from(if view.favorite { "Yes" } else { "No" }),
            ExportColumn::ExportedAt => exported_at.to_string(),
        }
    }
}

impl std::fmt::Display for ExportColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

impl std::str::FromStr for ExportColumn {
    type Err = ExportError;

    /// Header names match case-insensitively; spaces and underscores are
    /// interchangeable. `Date_Added` is accepted for older reports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        let column = match normalized.as_str() {
            "category" => ExportColumn::Category,
            "automation" | "name" => ExportColumn::Automation,
            "status" => ExportColumn::Status,
            "priority" => ExportColumn::Priority,
            "difficulty" => ExportColumn::Difficulty,
            "time_estimate" => ExportColumn::TimeEstimate,
            "cost_estimate" => ExportColumn::CostEstimate,
            "roi_potential" | "roi" => ExportColumn::RoiPotential,
            "tools" => ExportColumn::Tools,
            "notes" => ExportColumn::Notes,
            "favorite" => ExportColumn::Favorite,
            "exported_at" | "date_added" => ExportColumn::ExportedAt,
            _ => {
                return Err(ExportError::UnknownColumn {
                    column: s.trim().to_string(),
                })
            }
        };
        Ok(column)
    }
}

/// Parse a comma-separated column list.
pub fn parse_columns(list: &str) -> ExportResult<Vec<ExportColumn>> {
    list.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::parse)
        .collect()
}

/// A generated progress report.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    /// Suggested download filename.
    pub filename: String,
    /// Header names in order.
    pub columns: Vec<String>,
    /// Number of data rows.
    pub rows: usize,
    /// CSV text, header included.
    pub content: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl ProgressReport {
    /// Write the CSV content to `path`, replacing any existing file.
    pub fn write_to(&self, path: &std::path::Path) -> ExportResult<()> {
        std::fs::write(path, &self.content)?;
        info!(path = %path.display(), rows = self.rows, "Report written");
        Ok(())
    }
}

/// Suggested filename for a report generated at `now`.
pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("cleaning_automations_progress_{}.csv", now.format("%Y%m%d"))
}

/// Render the visible records of a projection.
pub fn export_projection(
    projection: &Projection,
    columns: &[ExportColumn],
    now: DateTime<Utc>,
) -> ProgressReport {
    let exported_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let headers: Vec<String> = columns.iter().map(|c| c.header().to_string()).collect();

    let mut content = csv::join_row(&headers);
    content.push('\n');

    let mut rows = 0;
    for (category, view) in projection.records() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| c.cell(&category.name, view, &exported_at))
            .collect();
        content.push_str(&csv::join_row(&cells));
        content.push('\n');
        rows += 1;
    }

    debug!(rows, columns = columns.len(), "Progress report rendered");

    ProgressReport {
        filename: report_filename(now),
        columns: headers,
        rows,
        content,
        generated_at: now,
    }
}

/// Render every catalog record.
pub fn export_catalog(
    catalog: &Catalog,
    session: &SessionState,
    columns: &[ExportColumn],
    now: DateTime<Utc>,
) -> ProgressReport {
    export_projection(
        &project(catalog, session, &FilterCriteria::new()),
        columns,
        now,
    )
}

/// Outcome of importing a progress report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows applied to the session.
    pub applied: usize,
    /// Automation names not present in the catalog.
    pub skipped: Vec<String>,
}

#[derive(Debug)]
struct RowUpdate {
    name: String,
    completed: Option<bool>,
    priority: Option<Priority>,
    note: Option<String>,
    favorite: Option<bool>,
}

// Older reports prefix status with an emoji ("✅ Completed").
fn strip_decoration(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn parse_status(value: &str) -> Option<bool> {
    match strip_decoration(value).to_lowercase().as_str() {
        "completed" | "complete" | "done" => Some(true),
        "pending" => Some(false),
        _ => None,
    }
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "y" => Some(true),
        "no" | "false" | "n" => Some(false),
        _ => None,
    }
}

/// Apply a previously exported report to a session.
///
/// Rows are validated before any change is made, so a bad value leaves the
/// session untouched. Only the `Automation` column is required; `Status`,
/// `Priority`, `Notes`, and `Favorite` are applied when present and
/// non-empty (an empty `Notes` cell clears the note). Rows naming
/// automations absent from the catalog are skipped.
pub fn import_csv(
    catalog: &Catalog,
    session: &mut SessionState,
    text: &str,
) -> ExportResult<ImportReport> {
    let mut rows = csv::parse(text)?.into_iter();
    let header = rows.next().ok_or_else(|| ExportError::MissingColumn {
        column: ExportColumn::Automation.header().to_string(),
    })?;

    let positions: Vec<Option<ExportColumn>> =
        header.iter().map(|h| h.parse::<ExportColumn>().ok()).collect();
    let find = |column: ExportColumn| positions.iter().position(|p| *p == Some(column));

    let name_idx = find(ExportColumn::Automation).ok_or_else(|| ExportError::MissingColumn {
        column: ExportColumn::Automation.header().to_string(),
    })?;
    let status_idx = find(ExportColumn::Status);
    let priority_idx = find(ExportColumn::Priority);
    let notes_idx = find(ExportColumn::Notes);
    let favorite_idx = find(ExportColumn::Favorite);

    let mut report = ImportReport::default();
    let mut updates = Vec::new();

    for (offset, row) in rows.enumerate() {
        // Header is row 1.
        let row_number = offset + 2;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);

        let name = cell(Some(name_idx)).unwrap_or_default();
        if !catalog.contains(name) {
            warn!(automation = %name, row = row_number, "Skipping unknown automation in import");
            report.skipped.push(name.to_string());
            continue;
        }

        let invalid = |column: ExportColumn, value: &str| ExportError::InvalidValue {
            column: column.header().to_string(),
            value: value.to_string(),
            row: row_number,
        };

        let completed = match cell(status_idx).filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(parse_status(v).ok_or_else(|| invalid(ExportColumn::Status, v))?),
            None => None,
        };
        let priority = match cell(priority_idx).filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(
                v.parse::<Priority>()
                    .map_err(|_| invalid(ExportColumn::Priority, v))?,
            ),
            None => None,
        };
        let favorite = match cell(favorite_idx).filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(parse_yes_no(v).ok_or_else(|| invalid(ExportColumn::Favorite, v))?),
            None => None,
        };
        let note = notes_idx.map(|i| row.get(i).cloned().unwrap_or_default());

        updates.push(RowUpdate {
            name: name.to_string(),
            completed,
            priority,
            note,
            favorite,
        });
    }

    for update in updates {
        if let Some(completed) = update.completed {
            session.set_completed(&update.name, completed);
        }
        // An unassigned record already reads as Medium.
        if let Some(priority) = update.priority {
            if priority != session.priority_of(&update.name) {
                session.set_priority(&update.name, priority);
            }
        }
        if let Some(note) = update.note {
            session.set_note(&update.name, &note);
        }
        if let Some(favorite) = update.favorite {
            session.set_favorite(&update.name, favorite);
        }
        report.applied += 1;
    }

    info!(
        applied = report.applied,
        skipped = report.skipped.len(),
        "Progress report imported"
    );
    Ok(report)
}
