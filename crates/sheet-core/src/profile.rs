//! Processing profile: the keyword sets and options that drive a run
//!
//! Profiles are JSON files. Every field is optional and falls back to the
//! built-in defaults.

use crate::classify::{
    ColumnClassifier, DEFAULT_DATE_KEYWORDS, DEFAULT_ID_KEYWORDS, DEFAULT_MONEY_COLUMNS,
};
use crate::error::{Error, Result};
use crate::summary::DEFAULT_SUMMARY_COLUMN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Keyword sets and options for one processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingProfile {
    /// Substrings that mark date columns
    pub date_keywords: Vec<String>,
    /// Substrings that mark identifier columns
    pub id_keywords: Vec<String>,
    /// Exact names of money columns
    pub money_columns: Vec<String>,
    /// Column to total, `None` to skip the summary
    pub summary_column: Option<usize>,
}

impl Default for ProcessingProfile {
    fn default() -> Self {
        Self {
            date_keywords: to_owned(DEFAULT_DATE_KEYWORDS),
            id_keywords: to_owned(DEFAULT_ID_KEYWORDS),
            money_columns: to_owned(DEFAULT_MONEY_COLUMNS),
            summary_column: Some(DEFAULT_SUMMARY_COLUMN),
        }
    }
}

impl ProcessingProfile {
    /// Load a profile from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parse a profile from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::Json)
    }

    /// Save the profile to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).map_err(|e| Error::FileWrite {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Classifier built from this profile's keyword sets
    pub fn classifier(&self) -> ColumnClassifier {
        ColumnClassifier::new(&self.id_keywords, &self.date_keywords, &self.money_columns)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
