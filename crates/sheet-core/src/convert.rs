//! Table-wide conversion of numeric-looking text columns
//!
//! Conversion runs in two passes. The first pass inspects every column and
//! records a [`ColumnDecision`] without touching the table; the second pass
//! rewrites only the columns whose decision is [`ColumnDecision::Convert`].
//! A column is converted as a whole or not at all: one non-numeric value in
//! an ordinary column keeps the entire column as text.

use crate::classify::ColumnClassifier;
use crate::normalize::{coerce_to_display_string, normalize_column_name};
use crate::numeric::{convert_numeric_text, is_numeric_str};
use crate::table::{CellValue, ColumnType, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of inspecting one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDecision {
    /// Column already holds numbers (or booleans, or nothing at all)
    AlreadyNumeric,
    /// Column is neither text nor an identifier column
    NotText,
    /// Column has no non-blank values and is not an identifier column
    NoValues,
    /// At least one value does not look numeric
    MixedContent,
    /// Column will be converted; `forced` marks identifier columns
    Convert { forced: bool },
}

impl ColumnDecision {
    /// Whether the column is rewritten as numbers
    pub fn converts(self) -> bool {
        matches!(self, ColumnDecision::Convert { .. })
    }
}

/// First-pass result for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnPlan {
    /// Column name as in the header
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
    /// Storage type inferred before conversion
    pub column_type: ColumnType,
    /// What the second pass will do with the column
    pub decision: ColumnDecision,
}

/// Inspect every column of `table` without modifying it
pub fn plan_conversion(table: &Table, classifier: &ColumnClassifier) -> Vec<ColumnPlan> {
    table
        .columns
        .iter()
        .map(|column| {
            let column_type = table.column_type(column.index);
            let decision = decide_column(table, column.index, &column.name, column_type, classifier);
            ColumnPlan {
                name: column.name.clone(),
                index: column.index,
                column_type,
                decision,
            }
        })
        .collect()
}

fn decide_column(
    table: &Table,
    index: usize,
    name: &str,
    column_type: ColumnType,
    classifier: &ColumnClassifier,
) -> ColumnDecision {
    if column_type.is_numeric() {
        return ColumnDecision::AlreadyNumeric;
    }

    let forced = classifier.is_force_numeric(&normalize_column_name(name));

    if !forced && column_type != ColumnType::Text {
        return ColumnDecision::NotText;
    }

    let non_null: Vec<&CellValue> = table.column_cells(index).filter(|c| !c.is_null()).collect();
    if non_null.is_empty() && !forced {
        return ColumnDecision::NoValues;
    }

    let display: Vec<String> = non_null
        .into_iter()
        .filter_map(coerce_to_display_string)
        .collect();
    if display.is_empty() && !forced {
        return ColumnDecision::NoValues;
    }

    if forced {
        ColumnDecision::Convert { forced: true }
    } else if display.iter().all(|text| is_numeric_str(text)) {
        ColumnDecision::Convert { forced: false }
    } else {
        ColumnDecision::MixedContent
    }
}

/// Convert numeric-looking text columns to floats using the default keywords.
///
/// Returns the table together with the names of the converted columns, in
/// column order.
pub fn convert_text_columns_to_numbers(table: Table) -> (Table, Vec<String>) {
    convert_text_columns_with(table, &ColumnClassifier::default())
}

/// Convert numeric-looking text columns to floats.
///
/// Converted cells become `Float`, or `Empty` when a value cannot be read;
/// that only happens in identifier columns, which skip the all-numeric check.
pub fn convert_text_columns_with(
    mut table: Table,
    classifier: &ColumnClassifier,
) -> (Table, Vec<String>) {
    let plans = plan_conversion(&table, classifier);
    let mut converted = Vec::new();

    for plan in &plans {
        debug!(column = %plan.name, decision = ?plan.decision, "column inspected");
        if !plan.decision.converts() {
            continue;
        }

        let cells: Vec<CellValue> = table
            .column_cells(plan.index)
            .map(|cell| convert_numeric_text(cell).map_or(CellValue::Empty, CellValue::Float))
            .collect();

        let dropped = cells
            .iter()
            .zip(table.column_cells(plan.index))
            .filter(|(new, old)| new.is_empty() && !old.is_null())
            .count();
        if dropped > 0 {
            debug!(column = %plan.name, dropped, "unreadable values blanked");
        }

        table.replace_column(plan.index, cells);
        converted.push(plan.name.clone());
    }

    info!(
        columns = table.column_count(),
        converted = converted.len(),
        "numeric conversion finished"
    );

    (table, converted)
}
