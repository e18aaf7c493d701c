//! Data types for the automation catalog.

use serde::{Deserialize, Serialize};

/// Implementation difficulty of an automation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    /// A few clicks in an off-the-shelf tool.
    Easy,
    /// Some wiring between two or more tools.
    #[default]
    Medium,
    /// Custom logic or integrations.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Expected return on investment of an automation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RoiPotential {
    /// High return.
    High,
    /// Medium return.
    #[default]
    Medium,
    /// Low return.
    Low,
}

impl std::fmt::Display for RoiPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoiPotential::High => write!(f, "High"),
            RoiPotential::Medium => write!(f, "Medium"),
            RoiPotential::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for RoiPotential {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RoiPotential::High),
            "medium" => Ok(RoiPotential::Medium),
            "low" => Ok(RoiPotential::Low),
            _ => Err(format!("Unknown ROI potential: {}", s)),
        }
    }
}

impl TryFrom<String> for RoiPotential {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One catalog entry.
///
/// The `name` is the record's identity: every session annotation is keyed
/// by it, so it must be unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordShape")]
pub struct AutomationRecord {
    /// Unique, stable record name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Implementation difficulty.
    pub difficulty: Difficulty,
    /// Free-text setup time range (e.g. "1-2 hours").
    pub time_estimate: String,
    /// Free-text running cost range (e.g. "$0-20/month").
    pub cost_estimate: String,
    /// Expected return on investment.
    pub roi_potential: RoiPotential,
    /// Tools commonly used to build it (display only).
    pub tools: Vec<String>,
}

/// Accepted on-disk shapes of a record.
///
/// Early catalogs list bare names; later ones carry full metadata. Both
/// load into [`AutomationRecord`] with missing fields defaulted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordShape {
    Name(String),
    Full(RecordFields),
}

#[derive(Debug, Deserialize)]
struct RecordFields {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default, alias = "timeEstimate")]
    time_estimate: String,
    #[serde(default, alias = "costEstimate")]
    cost_estimate: String,
    #[serde(default, alias = "roiPotential", alias = "roi")]
    roi_potential: RoiPotential,
    #[serde(default)]
    tools: Vec<String>,
}

impl From<RecordShape> for AutomationRecord {
    fn from(shape: RecordShape) -> Self {
        match shape {
            RecordShape::Name(name) => AutomationRecord::new(name),
            RecordShape::Full(fields) => AutomationRecord {
                name: fields.name,
                description: fields.description,
                difficulty: fields.difficulty,
                time_estimate: fields.time_estimate,
                cost_estimate: fields.cost_estimate,
                roi_potential: fields.roi_potential,
                tools: fields.tools,
            },
        }
    }
}

impl AutomationRecord {
    /// Create a record with only a name; everything else defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            difficulty: Difficulty::default(),
            time_estimate: String::new(),
            cost_estimate: String::new(),
            roi_potential: RoiPotential::default(),
            tools: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the time and cost estimates.
    pub fn with_estimates(mut self, time: impl Into<String>, cost: impl Into<String>) -> Self {
        self.time_estimate = time.into();
        self.cost_estimate = cost.into();
        self
    }

    /// Set the ROI potential.
    pub fn with_roi(mut self, roi: RoiPotential) -> Self {
        self.roi_potential = roi;
        self
    }

    /// Set the tool list.
    pub fn with_tools(mut self, tools: &[&str]) -> Self {
        self.tools = tools.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// A named group of automation records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category name.
    pub name: String,
    /// Display glyph.
    #[serde(default)]
    pub icon: String,
    /// Display colour hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Records in display order.
    #[serde(default)]
    pub items: Vec<AutomationRecord>,
}

/// Brief category summary for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Number of records.
    pub item_count: usize,
}

impl Category {
    /// Create a category.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        items: Vec<AutomationRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: None,
            items,
        }
    }

    /// Create a category from bare record names.
    pub fn from_names(name: impl Into<String>, icon: impl Into<String>, names: &[&str]) -> Self {
        Self::new(
            name,
            icon,
            names.iter().map(|n| AutomationRecord::new(*n)).collect(),
        )
    }

    /// Set the colour hint.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Number of records in this category.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Create a summary from the full category.
    pub fn to_summary(&self) -> CategorySummary {
        CategorySummary {
            name: self.name.clone(),
            icon: self.icon.clone(),
            item_count: self.item_count(),
        }
    }
}
