//! View/filter projection over the catalog and a session.
//!
//! [`project`] is a pure function of `(catalog, session, criteria)`; it is
//! recomputed in full on every call and holds no state between calls.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{AutomationRecord, Catalog, Category, Difficulty, RoiPotential};
use crate::session::{Priority, SessionState};

/// Completion status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum StatusFilter {
    /// Every record.
    #[default]
    All,
    /// Completed records only.
    Completed,
    /// Records not yet completed.
    Pending,
    /// Favorited records only.
    Favorites,
}

impl StatusFilter {
    /// Whether a record passes this filter.
    pub fn matches(&self, name: &str, session: &SessionState) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => session.is_completed(name),
            StatusFilter::Pending => !session.is_completed(name),
            StatusFilter::Favorites => session.is_favorite(name),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            "favorites" | "favourites" => Ok(StatusFilter::Favorites),
            _ => Err(format!("Unknown status filter: {}", s)),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// User-supplied filter parameters.
///
/// `None` in any optional field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring searched in names and descriptions.
    #[serde(default)]
    pub search: String,
    /// Selected category names; `None` selects every category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<String>>,
    /// Required difficulty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Required ROI potential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<RoiPotential>,
    /// Required session priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Completion status filter.
    #[serde(default)]
    pub status: StatusFilter,
}

impl FilterCriteria {
    /// Criteria that show every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to the given categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Require a difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Require an ROI potential.
    pub fn with_roi(mut self, roi: RoiPotential) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Require a priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status filter.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    fn selects_category(&self, category: &Category) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |selected| selected.contains(&category.name))
    }

    /// Whether a record is visible. The category selection is checked
    /// separately by [`project`].
    pub fn matches(&self, record: &AutomationRecord, session: &SessionState) -> bool {
        let needle = self.search.trim().to_lowercase();
        self.matches_with_needle(record, session, &needle)
    }

    fn matches_with_needle(
        &self,
        record: &AutomationRecord,
        session: &SessionState,
        needle: &str,
    ) -> bool {
        record.matches_search(needle)
            && self.difficulty.map_or(true, |d| record.difficulty == d)
            && self.roi.map_or(true, |r| record.roi_potential == r)
            && self
                .priority
                .map_or(true, |p| session.priority_of(&record.name) == p)
            && self.status.matches(&record.name, session)
    }
}

/// A record joined with its session annotations.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    /// Catalog data.
    #[serde(flatten)]
    pub record: AutomationRecord,
    /// Whether the record is complete.
    pub completed: bool,
    /// Whether the record is a favorite.
    pub favorite: bool,
    /// Effective priority.
    pub priority: Priority,
    /// Note text, empty when none.
    pub note: String,
    /// When the record was first completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_completed_at: Option<DateTime<Utc>>,
}

impl RecordView {
    /// Join a record with the session's annotations.
    pub fn new(record: &AutomationRecord, session: &SessionState) -> Self {
        let name = record.name.as_str();
        Self {
            record: record.clone(),
            completed: session.is_completed(name),
            favorite: session.is_favorite(name),
            priority: session.priority_of(name),
            note: session.note_of(name).unwrap_or_default().to_string(),
            first_completed_at: session.first_completed_at_of(name),
        }
    }
}

/// A category with the records that survived filtering.
#[derive(Debug, Clone, Serialize)]
pub struct VisibleCategory {
    /// Category name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Visible records in display order.
    pub records: Vec<RecordView>,
    /// Progress over the whole category, independent of the filter.
    pub progress: CategoryProgress,
}

/// Completed/total counts for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    /// Category name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Completed records.
    pub completed: usize,
    /// All records.
    pub total: usize,
    /// Completion percentage, one decimal.
    pub percentage: f64,
}

/// How many catalog records carry each priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// High priority records.
    pub high: usize,
    /// Medium priority records, including those never assigned.
    pub medium: usize,
    /// Low priority records.
    pub low: usize,
}

/// Aggregate progress over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetrics {
    /// Completed catalog records.
    pub completed: usize,
    /// All catalog records.
    pub total: usize,
    /// Records still pending.
    pub remaining: usize,
    /// Completion percentage, one decimal.
    pub percentage: f64,
    /// Favorited catalog records.
    pub favorites: usize,
    /// Per-category progress in display order.
    pub categories: Vec<CategoryProgress>,
    /// Priority distribution.
    pub priorities: PriorityBreakdown,
}

/// Result of projecting a session through filter criteria.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Categories with at least one visible record, in display order.
    pub categories: Vec<VisibleCategory>,
    /// Number of visible records.
    pub visible_count: usize,
    /// Aggregate progress.
    pub metrics: ProgressMetrics,
}

impl Projection {
    /// Visible records across all categories, in display order.
    pub fn records(&self) -> impl Iterator<Item = (&VisibleCategory, &RecordView)> {
        self.categories
            .iter()
            .flat_map(|c| c.records.iter().map(move |r| (c, r)))
    }

    /// Names of the visible records.
    pub fn visible_names(&self) -> BTreeSet<String> {
        self.records().map(|(_, r)| r.record.name.clone()).collect()
    }
}

/// `100 * completed / total`, rounded to one decimal; `0.0` for an empty total.
pub fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = completed as f64 * 100.0 / total as f64;
    (raw * 10.0).round() / 10.0
}

fn category_progress(category: &Category, session: &SessionState) -> CategoryProgress {
    let completed = category
        .items
        .iter()
        .filter(|r| session.is_completed(&r.name))
        .count();
    let total = category.item_count();
    CategoryProgress {
        name: category.name.clone(),
        icon: category.icon.clone(),
        completed,
        total,
        percentage: percentage(completed, total),
    }
}

/// Aggregate metrics, independent of any filter.
pub fn metrics(catalog: &Catalog, session: &SessionState) -> ProgressMetrics {
    let categories: Vec<CategoryProgress> = catalog
        .categories()
        .iter()
        .map(|c| category_progress(c, session))
        .collect();

    let mut priorities = PriorityBreakdown::default();
    for name in catalog.record_names() {
        match session.priority_of(name) {
            Priority::High => priorities.high += 1,
            Priority::Medium => priorities.medium += 1,
            Priority::Low => priorities.low += 1,
        }
    }

    let completed = session.completed_count(catalog);
    let total = catalog.total_count();
    ProgressMetrics {
        completed,
        total,
        remaining: total - completed,
        percentage: percentage(completed, total),
        favorites: session.favorite_count(catalog),
        categories,
        priorities,
    }
}

/// Derive the visible catalog subset and aggregate metrics.
pub fn project(catalog: &Catalog, session: &SessionState, criteria: &FilterCriteria) -> Projection {
    let needle = criteria.search.trim().to_lowercase();
    let mut categories = Vec::new();
    let mut visible_count = 0;

    for category in catalog.categories() {
        if !criteria.selects_category(category) {
            continue;
        }
        let records: Vec<RecordView> = category
            .items
            .iter()
            .filter(|r| criteria.matches_with_needle(r, session, &needle))
            .map(|r| RecordView::new(r, session))
            .collect();
        if records.is_empty() {
            continue;
        }
        visible_count += records.len();
        categories.push(VisibleCategory {
            name: category.name.clone(),
            icon: category.icon.clone(),
            records,
            progress: category_progress(category, session),
        });
    }

    Projection {
        categories,
        visible_count,
        metrics: metrics(catalog, session),
    }
}
