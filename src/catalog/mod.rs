//! Automation catalog store.
//!
//! This module provides:
//! - `AutomationRecord` and `Category`: the catalog data model
//! - `Catalog`: the validated, immutable category tree with name lookup
//! - Built-in catalog data for cleaning companies

mod builtins;
mod types;

pub use builtins::*;
pub use types::*;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::{CatalogError, CatalogResult};

/// The fixed category → record tree.
///
/// Constructed once and never mutated afterwards. Record names are unique
/// across all categories and index every lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate names.
    pub fn new(categories: Vec<Category>) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        for category in categories {
            catalog.push(category)?;
        }
        Ok(catalog)
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for category in builtins::categories() {
            let name = category.name.clone();
            if let Err(e) = catalog.push(category) {
                error!(
                    category = %name,
                    error = %e,
                    "Failed to register builtin category - this indicates a programming error"
                );
            }
        }
        debug!(
            categories = catalog.categories.len(),
            records = catalog.total_count(),
            "Builtin catalog loaded"
        );
        catalog
    }

    /// Parse a catalog from a JSON array of categories.
    pub fn from_json(text: &str) -> CatalogResult<Self> {
        let categories: Vec<Category> = serde_json::from_str(text)?;
        Self::new(categories)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            records = catalog.total_count(),
            "Catalog loaded from file"
        );
        Ok(catalog)
    }

    fn push(&mut self, category: Category) -> CatalogResult<()> {
        if category.name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                kind: "category".to_string(),
            });
        }
        if self.category(&category.name).is_some() {
            return Err(CatalogError::DuplicateCategory {
                name: category.name,
            });
        }

        // Validate the whole category before touching the index.
        let mut seen = HashSet::new();
        for record in &category.items {
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName {
                    kind: "automation".to_string(),
                });
            }
            if let Some(existing) = self.category_of(&record.name) {
                return Err(CatalogError::DuplicateRecord {
                    name: record.name.clone(),
                    first: existing.name.clone(),
                    second: category.name.clone(),
                });
            }
            if !seen.insert(record.name.as_str()) {
                return Err(CatalogError::DuplicateRecord {
                    name: record.name.clone(),
                    first: category.name.clone(),
                    second: category.name.clone(),
                });
            }
        }

        let cat_idx = self.categories.len();
        for (item_idx, record) in category.items.iter().enumerate() {
            self.index.insert(record.name.clone(), (cat_idx, item_idx));
        }
        self.categories.push(category);
        Ok(())
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up a record by name.
    pub fn record(&self, name: &str) -> Option<&AutomationRecord> {
        self.index
            .get(name)
            .map(|&(c, i)| &self.categories[c].items[i])
    }

    /// The category that owns a record.
    pub fn category_of(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&(c, _)| &self.categories[c])
    }

    /// Whether a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All `(category, record)` pairs in display order.
    pub fn records(&self) -> impl Iterator<Item = (&Category, &AutomationRecord)> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter().map(move |r| (c, r)))
    }

    /// All record names in display order.
    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.records().map(|(_, r)| r.name.as_str())
    }

    /// Total number of records across all categories.
    pub fn total_count(&self) -> usize {
        self.categories.iter().map(Category::item_count).sum()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Summaries of every category.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        self.categories.iter().map(Category::to_summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Category::from_names("Ops", "👷", &["A", "B"]),
            Category::from_names("Sales", "📈", &["C"]),
            Category::new("Empty", "∅", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_catalog_counts() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.category_count(), 7);
        assert_eq!(catalog.total_count(), 100);
    }

    #[test]
    fn test_total_count_is_sum_of_item_counts() {
        for catalog in [Catalog::builtin(), small_catalog(), Catalog::default()] {
            let sum: usize = catalog.categories().iter().map(|c| c.item_count()).sum();
            assert_eq!(catalog.total_count(), sum);
            assert_eq!(catalog.records().count(), sum);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = small_catalog();
        assert!(catalog.contains("A"));
        assert!(!catalog.contains("Z"));
        assert_eq!(catalog.record("C").unwrap().name, "C");
        assert_eq!(catalog.category_of("B").unwrap().name, "Ops");
        assert!(catalog.category_of("Z").is_none());
        assert_eq!(catalog.category("Empty").unwrap().item_count(), 0);
    }

    #[test]
    fn test_record_names_in_display_order() {
        let catalog = small_catalog();
        let names: Vec<&str> = catalog.record_names().collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_record_across_categories_rejected() {
        let result = Catalog::new(vec![
            Category::from_names("One", "1", &["Same"]),
            Category::from_names("Two", "2", &["Same"]),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateRecord { .. })));
    }

    #[test]
    fn test_duplicate_record_within_category_rejected() {
        let result = Catalog::new(vec![Category::from_names("One", "1", &["Same", "Same"])]);
        assert!(matches!(result, Err(CatalogError::DuplicateRecord { .. })));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = Catalog::new(vec![
            Category::from_names("One", "1", &["A"]),
            Category::from_names("One", "1", &["B"]),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateCategory { .. })));
    }

    #[test]
    fn test_empty_names_rejected() {
        let result = Catalog::new(vec![Category::from_names(" ", "1", &["A"])]);
        assert!(matches!(result, Err(CatalogError::EmptyName { .. })));

        let result = Catalog::new(vec![Category::from_names("One", "1", &[""])]);
        assert!(matches!(result, Err(CatalogError::EmptyName { .. })));
    }

    #[test]
    fn test_from_json_legacy_and_structured() {
        let catalog = Catalog::from_json(
            r#"[
                {"name": "Legacy", "icon": "📜", "items": ["Plain one", "Plain two"]},
                {"name": "Modern", "icon": "✨", "items": [
                    {"name": "Rich", "difficulty": "Hard", "roi_potential": "High", "tools": ["Zapier"]}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.total_count(), 3);
        assert_eq!(catalog.record("Plain one").unwrap().difficulty, Difficulty::Medium);
        assert_eq!(catalog.record("Rich").unwrap().difficulty, Difficulty::Hard);
        assert_eq!(catalog.record("Rich").unwrap().roi_potential, RoiPotential::High);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_summaries() {
        let summaries = small_catalog().summaries();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].item_count, 2);
        assert_eq!(summaries[2].item_count, 0);
    }
}
