//! Totals for a single column of the cleaned table

use crate::table::{CellValue, Table};
use serde::{Deserialize, Serialize};

/// Column H in spreadsheet terms
pub const DEFAULT_SUMMARY_COLUMN: usize = 7;

/// Sum of a column, split by sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name as in the header
    pub column: String,
    /// Column index (0-based)
    pub index: usize,
    /// Sum of every numeric value
    pub total: f64,
    /// Sum of the positive values
    pub positive: f64,
    /// Sum of the negative values
    pub negative: f64,
    /// Number of cells that contributed
    pub counted: usize,
}

/// Sum the column at `index`, or `None` if the table is narrower than that.
///
/// Numbers count as-is and text counts only if it is a plain number; no
/// separator or currency cleanup happens here, so this reflects the table
/// after conversion.
pub fn summarize_column(table: &Table, index: usize) -> Option<ColumnSummary> {
    let column = table.columns.get(index)?;

    let mut summary = ColumnSummary {
        column: column.name.clone(),
        index,
        total: 0.0,
        positive: 0.0,
        negative: 0.0,
        counted: 0,
    };

    for value in table.column_cells(index).filter_map(plain_number) {
        summary.total += value;
        if value > 0.0 {
            summary.positive += value;
        } else if value < 0.0 {
            summary.negative += value;
        }
        summary.counted += 1;
    }

    Some(summary)
}

fn plain_number(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Integer(_) | CellValue::Float(_) => cell.as_f64(),
        CellValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_tables_have_no_summary() {
        let table = Table::from_columns("mem", vec![("a", vec![CellValue::Integer(1)])]);
        assert_eq!(summarize_column(&table, DEFAULT_SUMMARY_COLUMN), None);
    }

    #[test]
    fn test_sums_by_sign() {
        let table = Table::from_columns(
            "mem",
            vec![(
                "monto",
                vec![
                    CellValue::Float(10.5),
                    CellValue::Integer(-4),
                    CellValue::String(" 2 ".into()),
                    CellValue::String("1.234,5".into()),
                    CellValue::Float(f64::NAN),
                    CellValue::Empty,
                ],
            )],
        );

        let summary = summarize_column(&table, 0).unwrap();
        assert_eq!(summary.column, "monto");
        assert_eq!(summary.total, 8.5);
        assert_eq!(summary.positive, 12.5);
        assert_eq!(summary.negative, -4.0);
        assert_eq!(summary.counted, 3);
    }

    #[test]
    fn test_empty_column_sums_to_zero() {
        let table = Table::from_columns("mem", vec![("monto", vec![CellValue::Empty])]);
        let summary = summarize_column(&table, 0).unwrap();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.counted, 0);
    }
}
