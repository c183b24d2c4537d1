use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Explorer configuration
// ---------------------------------------------------------------------------

/// Tunables for the cleaning pipeline and the dashboard.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```toml
/// top_words = 25
///
/// [columns]
/// source = "source"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub columns: ColumnRoles,
    /// Columns with a strictly larger missing fraction are dropped.
    pub max_missing_fraction: f64,
    pub top_journals: usize,
    pub top_sources: usize,
    pub top_words: usize,
    /// Rows shown in the sample data table.
    pub sample_rows: usize,
    /// Year slider bounds used when the table has no parseable dates.
    pub fallback_year_range: (i32, i32),
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnRoles::default(),
            max_missing_fraction: 0.70,
            top_journals: 10,
            top_sources: 10,
            top_words: 15,
            sample_rows: 20,
            fallback_year_range: (2015, 2022),
        }
    }
}

impl ExplorerConfig {
    /// Read a TOML config file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Names of the columns each pipeline stage reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    pub id: String,
    /// Required: rows without it are dropped.
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub abstract_text: String,
    pub publish_time: String,
    /// Optional in the input schema.
    pub source: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            id: "cord_uid".into(),
            title: "title".into(),
            authors: "authors".into(),
            journal: "journal".into(),
            abstract_text: "abstract".into(),
            publish_time: "publish_time".into(),
            source: "source_x".into(),
        }
    }
}
