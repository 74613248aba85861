//! Column roles derived from normalized column names

use crate::normalize::normalize_column_name;
use serde::{Deserialize, Serialize};

/// Substrings marking identifier columns
pub const DEFAULT_ID_KEYWORDS: &[&str] = &["id"];

/// Substrings marking date columns
pub const DEFAULT_DATE_KEYWORDS: &[&str] = &["fecha", "liberacion", "liberación"];

/// Exact column names that hold money amounts
pub const DEFAULT_MONEY_COLUMNS: &[&str] = &[
    "valor de la compra",
    "comision mas iva",
    "comisión más iva",
    "monto neto de operacion",
    "monto neto de operación",
    "impuestos cobrados por retenciones iibb",
];

/// Semantic role of a column, recomputed on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Identifier column, always converted to numbers
    Identifier,
    /// Money column, shown with a currency format
    Monetary,
    /// Date column, parsed into dates
    Date,
    /// No particular role
    Unclassified,
}

/// Whether a normalized name marks a force-numeric (identifier) column
pub fn is_force_numeric_column(normalized_name: &str) -> bool {
    DEFAULT_ID_KEYWORDS
        .iter()
        .any(|keyword| normalized_name.contains(*keyword))
}

/// Whether a normalized name is exactly one of the money column names.
///
/// Unlike keyword matching this is an exact comparison: `"valor de compra
/// extra"` is not a money column.
pub fn is_money_column(normalized_name: &str) -> bool {
    DEFAULT_MONEY_COLUMNS
        .iter()
        .any(|target| *target == normalized_name)
}

/// Return the columns whose normalized name contains any normalized keyword.
///
/// Matches keep the original column order and each column appears at most
/// once. Keywords that normalize to an empty string match nothing.
pub fn find_columns_by_keywords<'a, I, K>(columns: I, keywords: &[K]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    K: AsRef<str>,
{
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| normalize_column_name(k.as_ref()))
        .collect();

    columns
        .into_iter()
        .filter(|column| contains_any(&normalize_column_name(column), &keywords))
        .map(str::to_string)
        .collect()
}

fn contains_any(normalized_name: &str, normalized_keywords: &[String]) -> bool {
    normalized_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && normalized_name.contains(keyword.as_str()))
}

/// Keyword sets used to classify columns, stored pre-normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClassifier {
    id_keywords: Vec<String>,
    date_keywords: Vec<String>,
    money_columns: Vec<String>,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ID_KEYWORDS, DEFAULT_DATE_KEYWORDS, DEFAULT_MONEY_COLUMNS)
    }
}

impl ColumnClassifier {
    /// Create a classifier; every keyword and money name is normalized once here
    pub fn new<S: AsRef<str>>(id_keywords: &[S], date_keywords: &[S], money_columns: &[S]) -> Self {
        let normalize_all = |items: &[S]| -> Vec<String> {
            items
                .iter()
                .map(|s| normalize_column_name(s.as_ref()))
                .collect()
        };

        Self {
            id_keywords: normalize_all(id_keywords),
            date_keywords: normalize_all(date_keywords),
            money_columns: normalize_all(money_columns),
        }
    }

    /// Identifier test on an already-normalized name (substring match)
    pub fn is_force_numeric(&self, normalized_name: &str) -> bool {
        contains_any(normalized_name, &self.id_keywords)
    }

    /// Date test on an already-normalized name (substring match)
    pub fn is_date(&self, normalized_name: &str) -> bool {
        contains_any(normalized_name, &self.date_keywords)
    }

    /// Money test on an already-normalized name (exact match)
    pub fn is_money(&self, normalized_name: &str) -> bool {
        !normalized_name.is_empty() && self.money_columns.iter().any(|m| m == normalized_name)
    }

    /// Date columns of a table, in column order
    pub fn date_columns<'a, I>(&self, columns: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        find_columns_by_keywords(columns, &self.date_keywords)
    }

    /// Role of a raw column name. Money beats identifier beats date.
    pub fn role(&self, column_name: &str) -> ColumnRole {
        let normalized = normalize_column_name(column_name);
        if self.is_money(&normalized) {
            ColumnRole::Monetary
        } else if self.is_force_numeric(&normalized) {
            ColumnRole::Identifier
        } else if self.is_date(&normalized) {
            ColumnRole::Date
        } else {
            ColumnRole::Unclassified
        }
    }
}
