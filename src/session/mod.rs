//! Per-session progress state.
//!
//! A session owns five annotations keyed by record name: completion,
//! notes, priority, favorites, and the time each record was first
//! completed. Nothing here is durable; a session lives as long as the
//! process that created it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{AutomationRecord, Catalog};

/// User-assigned implementation priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    /// Do first.
    High,
    /// Default for records without an explicit priority.
    #[default]
    Medium,
    /// Do last.
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which annotations `reset_all` clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    /// Clear every annotation, including favorites and first-completion times.
    #[default]
    Everything,
    /// Clear completion, notes, and priorities; keep favorites and
    /// first-completion times.
    ProgressOnly,
}

impl std::fmt::Display for ResetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetScope::Everything => write!(f, "everything"),
            ResetScope::ProgressOnly => write!(f, "progress"),
        }
    }
}

impl std::str::FromStr for ResetScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "everything" | "all" => Ok(ResetScope::Everything),
            "progress" | "progress_only" => Ok(ResetScope::ProgressOnly),
            _ => Err(format!("Unknown reset scope: {}", s)),
        }
    }
}

/// Mutable annotations for one session, keyed by record name.
///
/// Keys are not checked against a catalog here; names that are not in the
/// catalog are kept but never counted (see [`SessionState::orphaned_keys`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    completed: BTreeSet<String>,
    notes: BTreeMap<String, String>,
    priority: BTreeMap<String, Priority>,
    favorites: BTreeSet<String>,
    first_completed_at: BTreeMap<String, DateTime<Utc>>,
}

impl SessionState {
    /// Create an empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a record complete or pending at the current time.
    pub fn set_completed(&mut self, name: &str, completed: bool) -> bool {
        self.set_completed_at(name, completed, Utc::now())
    }

    /// Mark a record complete or pending.
    ///
    /// The first completion time is recorded once and survives
    /// un-completion. Returns whether membership changed.
    pub fn set_completed_at(&mut self, name: &str, completed: bool, now: DateTime<Utc>) -> bool {
        if completed {
            let added = self.completed.insert(name.to_string());
            if added {
                self.first_completed_at
                    .entry(name.to_string())
                    .or_insert(now);
            }
            added
        } else {
            self.completed.remove(name)
        }
    }

    /// Favorite or unfavorite a record.
    pub fn set_favorite(&mut self, name: &str, favorite: bool) {
        if favorite {
            self.favorites.insert(name.to_string());
        } else {
            self.favorites.remove(name);
        }
    }

    /// Assign a priority.
    pub fn set_priority(&mut self, name: &str, priority: Priority) {
        self.priority.insert(name.to_string(), priority);
    }

    /// Replace a record's note. An empty note removes it.
    pub fn set_note(&mut self, name: &str, text: &str) {
        if text.is_empty() {
            self.notes.remove(name);
        } else {
            self.notes.insert(name.to_string(), text.to_string());
        }
    }

    /// Clear annotations according to `scope`.
    pub fn reset_all(&mut self, scope: ResetScope) {
        self.completed.clear();
        self.notes.clear();
        self.priority.clear();
        if scope == ResetScope::Everything {
            self.favorites.clear();
            self.first_completed_at.clear();
        }
    }

    /// Complete every catalog record matching `predicate`.
    ///
    /// Returns the number of records that were newly completed.
    pub fn complete_all_matching<F>(&mut self, catalog: &Catalog, predicate: F) -> usize
    where
        F: Fn(&AutomationRecord) -> bool,
    {
        self.complete_all_matching_at(catalog, predicate, Utc::now())
    }

    /// [`SessionState::complete_all_matching`] with an explicit clock.
    pub fn complete_all_matching_at<F>(
        &mut self,
        catalog: &Catalog,
        predicate: F,
        now: DateTime<Utc>,
    ) -> usize
    where
        F: Fn(&AutomationRecord) -> bool,
    {
        let mut added = 0;
        for (_, record) in catalog.records() {
            if predicate(record) && self.set_completed_at(&record.name, true, now) {
                added += 1;
            }
        }
        added
    }

    /// Whether a record is complete.
    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    /// Whether a record is a favorite.
    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    /// A record's priority, `Medium` when unset.
    pub fn priority_of(&self, name: &str) -> Priority {
        self.priority.get(name).copied().unwrap_or_default()
    }

    /// A record's note, if any.
    pub fn note_of(&self, name: &str) -> Option<&str> {
        self.notes.get(name).map(String::as_str)
    }

    /// When a record was first completed, if ever.
    pub fn first_completed_at_of(&self, name: &str) -> Option<DateTime<Utc>> {
        self.first_completed_at.get(name).copied()
    }

    /// Completed record names, including orphans.
    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    /// Favorite record names, including orphans.
    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    /// Explicit priority assignments.
    pub fn priorities(&self) -> &BTreeMap<String, Priority> {
        &self.priority
    }

    /// Notes by record name.
    pub fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    /// First completion times by record name.
    pub fn first_completions(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.first_completed_at
    }

    /// Number of catalog records that are complete.
    pub fn completed_count(&self, catalog: &Catalog) -> usize {
        self.completed.iter().filter(|n| catalog.contains(n)).count()
    }

    /// Number of catalog records that are favorites.
    pub fn favorite_count(&self, catalog: &Catalog) -> usize {
        self.favorites.iter().filter(|n| catalog.contains(n)).count()
    }

    /// Annotated names that no longer exist in the catalog.
    pub fn orphaned_keys(&self, catalog: &Catalog) -> BTreeSet<String> {
        self.completed
            .iter()
            .chain(self.favorites.iter())
            .chain(self.notes.keys())
            .chain(self.priority.keys())
            .chain(self.first_completed_at.keys())
            .filter(|n| !catalog.contains(n))
            .cloned()
            .collect()
    }

    /// Whether no annotation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
            && self.notes.is_empty()
            && self.priority.is_empty()
            && self.favorites.is_empty()
            && self.first_completed_at.is_empty()
    }

    /// Serializable copy of the current progress.
    pub fn snapshot(&self, session_id: &str, catalog: &Catalog) -> ProgressSnapshot {
        ProgressSnapshot {
            session_id: session_id.to_string(),
            completed: self.completed.iter().cloned().collect(),
            notes: self.notes.clone(),
            priorities: self.priority.clone(),
            favorites: self.favorites.iter().cloned().collect(),
            first_completed_at: self.first_completed_at.clone(),
            orphaned: self.orphaned_keys(catalog).into_iter().collect(),
            last_updated: Utc::now(),
        }
    }
}

/// Point-in-time copy of a session's progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Session the snapshot was taken from.
    pub session_id: String,
    /// Completed record names, sorted.
    pub completed: Vec<String>,
    /// Notes by record name.
    pub notes: BTreeMap<String, String>,
    /// Explicit priorities by record name.
    pub priorities: BTreeMap<String, Priority>,
    /// Favorite record names, sorted.
    pub favorites: Vec<String>,
    /// First completion times by record name.
    pub first_completed_at: BTreeMap<String, DateTime<Utc>>,
    /// Annotated names missing from the catalog, sorted.
    #[serde(default)]
    pub orphaned: Vec<String>,
    /// When the snapshot was taken.
    pub last_updated: DateTime<Utc>,
}

/// One user's session: identity plus state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Progress annotations.
    pub state: SessionState,
}

impl Session {
    /// Start a new, empty session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            state: SessionState::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
