// Core data structures for newsdigest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display labels the upstream model uses for section markers, in lookup order.
///
/// Longer Japanese labels come before their abbreviations so that
/// `経済・ビジネス` is tried before `経済`.
pub const CATEGORY_LABELS: &[(&str, NewsCategory)] = &[
    ("テクノロジー", NewsCategory::Technology),
    ("経済・ビジネス", NewsCategory::Business),
    ("政治・国際関係", NewsCategory::Politics),
    ("経済", NewsCategory::Business),
    ("政治", NewsCategory::Politics),
    ("TECHNOLOGY", NewsCategory::Technology),
    ("BUSINESS", NewsCategory::Business),
    ("POLITICS", NewsCategory::Politics),
    ("Technology", NewsCategory::Technology),
    ("Business", NewsCategory::Business),
    ("Politics", NewsCategory::Politics),
];

/// News category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Business,
    Technology,
    Politics,
}

impl NewsCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Technology => "technology",
            Self::Politics => "politics",
        }
    }

    /// Get Japanese display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Business => "経済・ビジネス",
            Self::Technology => "テクノロジー",
            Self::Politics => "政治・国際関係",
        }
    }

    /// Label sent upstream in the `inputs.category` request field
    pub fn request_label(&self) -> &'static str {
        match self {
            Self::Business => "経済・ビジネス (business)",
            Self::Technology => "テクノロジー (technology)",
            Self::Politics => "政治・国際関係 (politics)",
        }
    }

    /// Classify a section marker label.
    ///
    /// Exact lookup against [`CATEGORY_LABELS`]; the segmenter never emits a
    /// label that is missing from the table.
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, category)| *category)
    }

    /// Create from user input (supports English and Japanese names)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "business" | "economy" => Some(Self::Business),
            "technology" | "tech" => Some(Self::Technology),
            "politics" => Some(Self::Politics),
            other => Self::from_label(other),
        }
    }

    /// Get all categories
    pub fn all() -> Vec<Self> {
        vec![Self::Business, Self::Technology, Self::Politics]
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recovered news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub business_insight: String,
    /// Source link; empty only for per-section catch-all items
    pub url: String,
    /// Extraction time, not publication time
    pub timestamp: DateTime<Utc>,
    pub category: NewsCategory,
    pub source: String,
}

impl NewsItem {
    /// Generate an id unique within one extraction run
    pub fn generate_id(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }

    /// Whether two items carry the same content, ignoring `id` and `timestamp`
    pub fn same_content(&self, other: &Self) -> bool {
        self.title == other.title
            && self.summary == other.summary
            && self.business_insight == other.business_insight
            && self.url == other.url
            && self.category == other.category
            && self.source == other.source
    }
}
