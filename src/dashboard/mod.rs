//! Session-scoped dashboard context.
//!
//! [`Dashboard`] binds one [`Session`] to a shared [`Catalog`] and is the
//! single entry point the server and CLI use. Every mutation is checked
//! against the catalog first, so session maps only ever gain names that
//! exist; lookups of unknown names are reported as [`SessionError`]s and
//! leave the session untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::{AutomationRecord, Catalog, Difficulty};
use crate::config::Config;
use crate::error::{ExportResult, SessionError, SessionResult};
use crate::export::{export_projection, import_csv, ExportColumn, ImportReport, ProgressReport};
use crate::projection::{metrics, project, FilterCriteria, Projection, ProgressMetrics, RecordView};
use crate::session::{Priority, ProgressSnapshot, ResetScope, Session, SessionState};

/// One user's dashboard over a shared catalog.
#[derive(Debug, Clone)]
pub struct Dashboard {
    catalog: Arc<Catalog>,
    session: Session,
    reset_scope: ResetScope,
    export_columns: Vec<ExportColumn>,
}

impl Dashboard {
    /// Start a new session over `catalog` with default settings.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let session = Session::new();
        info!(
            session_id = %session.id,
            records = catalog.total_count(),
            "Dashboard session started"
        );
        Self {
            catalog,
            session,
            reset_scope: ResetScope::default(),
            export_columns: ExportColumn::ALL.to_vec(),
        }
    }

    /// Start a new session using the configured reset scope and columns.
    pub fn from_config(catalog: Arc<Catalog>, config: &Config) -> Self {
        Self::new(catalog)
            .with_reset_scope(config.session.reset_scope)
            .with_export_columns(config.export.columns.clone())
    }

    /// Set what [`Dashboard::reset`] clears.
    pub fn with_reset_scope(mut self, scope: ResetScope) -> Self {
        self.reset_scope = scope;
        self
    }

    /// Set the default export columns.
    pub fn with_export_columns(mut self, columns: Vec<ExportColumn>) -> Self {
        self.export_columns = columns;
        self
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The session's annotations.
    pub fn state(&self) -> &SessionState {
        &self.session.state
    }

    /// The configured reset scope.
    pub fn reset_scope(&self) -> ResetScope {
        self.reset_scope
    }

    /// The configured export columns.
    pub fn export_columns(&self) -> &[ExportColumn] {
        &self.export_columns
    }

    fn require_record(&self, name: &str) -> SessionResult<&AutomationRecord> {
        self.catalog.record(name).ok_or_else(|| {
            warn!(automation = %name, session_id = %self.session.id, "Unknown automation");
            SessionError::UnknownRecord {
                name: name.to_string(),
            }
        })
    }

    fn require_category(&self, name: &str) -> SessionResult<()> {
        if self.catalog.category(name).is_some() {
            Ok(())
        } else {
            warn!(category = %name, session_id = %self.session.id, "Unknown category");
            Err(SessionError::UnknownCategory {
                name: name.to_string(),
            })
        }
    }

    fn view_of(&self, name: &str) -> SessionResult<RecordView> {
        let record = self.require_record(name)?;
        Ok(RecordView::new(record, &self.session.state))
    }

    /// One record joined with its annotations.
    pub fn record(&self, name: &str) -> SessionResult<RecordView> {
        self.view_of(name)
    }

    /// Mark a record complete or pending.
    pub fn set_completed(&mut self, name: &str, completed: bool) -> SessionResult<RecordView> {
        self.require_record(name)?;
        let changed = self.session.state.set_completed(name, completed);
        info!(automation = %name, completed, changed, "Completion updated");
        self.view_of(name)
    }

    /// Favorite or unfavorite a record.
    pub fn set_favorite(&mut self, name: &str, favorite: bool) -> SessionResult<RecordView> {
        self.require_record(name)?;
        self.session.state.set_favorite(name, favorite);
        info!(automation = %name, favorite, "Favorite updated");
        self.view_of(name)
    }

    /// Set a record's priority.
    pub fn set_priority(&mut self, name: &str, priority: Priority) -> SessionResult<RecordView> {
        self.require_record(name)?;
        self.session.state.set_priority(name, priority);
        info!(automation = %name, %priority, "Priority updated");
        self.view_of(name)
    }

    /// Replace a record's note; an empty note removes it.
    pub fn set_note(&mut self, name: &str, note: &str) -> SessionResult<RecordView> {
        self.require_record(name)?;
        self.session.state.set_note(name, note);
        info!(automation = %name, length = note.len(), "Note updated");
        self.view_of(name)
    }

    /// Complete every record matching the optional difficulty and category.
    ///
    /// With neither filter set, the whole catalog is completed. Returns the
    /// number of records newly completed.
    pub fn complete_all(
        &mut self,
        difficulty: Option<Difficulty>,
        category: Option<&str>,
    ) -> SessionResult<usize> {
        if let Some(category) = category {
            self.require_category(category)?;
        }

        let catalog = Arc::clone(&self.catalog);
        let added = self.session.state.complete_all_matching(&catalog, |record| {
            difficulty.map_or(true, |d| record.difficulty == d)
                && category.map_or(true, |c| {
                    catalog
                        .category_of(&record.name)
                        .is_some_and(|owner| owner.name == c)
                })
        });

        info!(
            difficulty = ?difficulty,
            category = ?category,
            added,
            "Bulk completion applied"
        );
        Ok(added)
    }

    /// Clear the session according to the configured reset scope.
    pub fn reset(&mut self) {
        self.session.state.reset_all(self.reset_scope);
        info!(
            session_id = %self.session.id,
            scope = %self.reset_scope,
            "Session reset"
        );
    }

    /// Evaluate a filter against the catalog.
    pub fn view(&self, criteria: &FilterCriteria) -> SessionResult<Projection> {
        if let Some(categories) = &criteria.categories {
            for category in categories {
                self.require_category(category)?;
            }
        }
        let projection = project(&self.catalog, &self.session.state, criteria);
        debug!(
            visible = projection.visible_count,
            categories = projection.categories.len(),
            "Projection evaluated"
        );
        Ok(projection)
    }

    /// Progress metrics over the whole catalog.
    pub fn metrics(&self) -> ProgressMetrics {
        metrics(&self.catalog, &self.session.state)
    }

    /// Render a progress report.
    ///
    /// `criteria` limits the rows to a filtered view; `columns` overrides
    /// the configured column list.
    pub fn export(
        &self,
        criteria: Option<&FilterCriteria>,
        columns: Option<&[ExportColumn]>,
    ) -> SessionResult<ProgressReport> {
        let projection = match criteria {
            Some(criteria) => self.view(criteria)?,
            None => self.view(&FilterCriteria::new())?,
        };
        let columns = columns.unwrap_or(&self.export_columns);
        let report = export_projection(&projection, columns, Utc::now());
        info!(
            filename = %report.filename,
            rows = report.rows,
            "Progress report exported"
        );
        Ok(report)
    }

    /// Apply a previously exported report to this session.
    pub fn import(&mut self, content: &str) -> ExportResult<ImportReport> {
        import_csv(&self.catalog, &mut self.session.state, content)
    }

    /// A copy of the session's progress.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.session.state.snapshot(&self.session.id, &self.catalog)
    }

    /// Session keys that name no catalog record.
    pub fn orphaned_keys(&self) -> BTreeSet<String> {
        self.session.state.orphaned_keys(&self.catalog)
    }
}
