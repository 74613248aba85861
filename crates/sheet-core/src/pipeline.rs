//! End-to-end cleaning of one table

use crate::convert::convert_text_columns_with;
use crate::dates::normalize_date_columns;
use crate::format::{build_format_plan, FormatPlan};
use crate::profile::ProcessingProfile;
use crate::summary::{summarize_column, ColumnSummary};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Prefix given to cleaned output files
pub const OUTPUT_PREFIX: &str = "convertido_";

/// A cleaned table and everything learned while cleaning it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTable {
    /// The cleaned table
    pub table: Table,
    /// Columns converted from text to numbers, in column order
    pub converted_columns: Vec<String>,
    /// Columns rewritten as dates, in column order
    pub date_columns: Vec<String>,
    /// Date cells that could not be read and were blanked
    pub blanked_dates: usize,
    /// Display formats for the output sheet
    pub format_plan: FormatPlan,
    /// Totals of the summary column, when the table is wide enough
    pub summary: Option<ColumnSummary>,
}

/// Clean a table: numeric conversion, then date columns, then the display
/// plan and summary.
pub fn process_table(table: Table, profile: &ProcessingProfile) -> ProcessedTable {
    let span = info_span!("process_table", source = %table.source_path.display());
    let _guard = span.enter();

    let classifier = profile.classifier();
    let (mut table, converted_columns) = convert_text_columns_with(table, &classifier);

    let date_columns = classifier.date_columns(table.column_names());
    let blanked_dates = normalize_date_columns(&mut table, &date_columns);

    let format_plan = build_format_plan(&table, &classifier);
    let summary = profile
        .summary_column
        .and_then(|index| summarize_column(&table, index));

    info!(
        rows = table.row_count(),
        converted = converted_columns.len(),
        dates = date_columns.len(),
        blanked_dates,
        "table processed"
    );

    ProcessedTable {
        table,
        converted_columns,
        date_columns,
        blanked_dates,
        format_plan,
        summary,
    }
}

/// Output path for a cleaned file: same directory, `convertido_` prefix
pub fn converted_file_name(original: &Path) -> PathBuf {
    let file_name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    original.with_file_name(format!("{OUTPUT_PREFIX}{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_processes_a_settlement_sheet() {
        let table = Table::from_columns(
            "ventas.csv",
            vec![
                ("Fecha de liberación", vec![text("2024-01-05"), text("2024-01-06")]),
                ("Operacion ID", vec![text("000123"), text("000124")]),
                ("Valor de la compra", vec![text("$ 1.500,00"), text("$ 200,50")]),
                ("Descripcion", vec![text("venta"), text("devolucion")]),
            ],
        );

        let processed = process_table(table, &ProcessingProfile::default());

        assert_eq!(
            processed.converted_columns,
            vec!["Operacion ID", "Valor de la compra"]
        );
        assert_eq!(processed.date_columns, vec!["Fecha de liberación"]);
        assert_eq!(processed.blanked_dates, 0);
        assert_eq!(
            processed.table.rows[0].cells[0],
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2024, 1, 5)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
        assert_eq!(processed.table.rows[1].cells[2], CellValue::Float(200.5));
        assert_eq!(processed.summary, None);
        assert_eq!(processed.format_plan.columns.len(), 4);
    }

    #[test]
    fn test_summary_uses_profile_column() {
        let table = Table::from_columns(
            "mem",
            vec![("neto", vec![text("(10,00)"), text("25,50")])],
        );
        let profile = ProcessingProfile {
            summary_column: Some(0),
            ..ProcessingProfile::default()
        };

        let summary = process_table(table, &profile).summary.unwrap();

        assert_eq!(summary.total, 15.5);
        assert_eq!(summary.negative, -10.0);
    }

    #[test]
    fn test_output_name_is_prefixed() {
        assert_eq!(
            converted_file_name(Path::new("/tmp/in/ventas.csv")),
            PathBuf::from("/tmp/in/convertido_ventas.csv")
        );
        assert_eq!(
            converted_file_name(Path::new("ventas.csv")),
            PathBuf::from("convertido_ventas.csv")
        );
    }
}
