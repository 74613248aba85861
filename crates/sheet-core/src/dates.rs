//! Date column normalization
//!
//! Date columns are located by keyword and every cell is coerced to a
//! timezone-naive timestamp. Values that cannot be read become empty.

use crate::table::{CellValue, Table};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Month-first is tried before day-first, so "01/02/2024" is January 2nd.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Largest spreadsheet serial date (9999-12-31)
const MAX_SERIAL_DATE: f64 = 2_958_465.0;

/// Read a cell as a timestamp.
///
/// Strings are tried as RFC 3339 (offset dropped, wall-clock time kept) and
/// then against a fixed list of formats. Numbers are spreadsheet serial
/// dates counted from 1899-12-30.
pub fn parse_date_cell(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Integer(i) => from_serial(*i as f64),
        CellValue::Float(f) => from_serial(*f),
        CellValue::String(s) => parse_date_str(s),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Read a date or timestamp from text
pub fn parse_date_str(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL_DATE {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Rewrite the named columns as timestamps.
///
/// Returns the number of non-empty cells that could not be read and were
/// blanked. Names that are not columns of the table are ignored.
pub fn normalize_date_columns(table: &mut Table, columns: &[String]) -> usize {
    let mut blanked = 0;

    for name in columns {
        let Some(index) = table.find_column(name).map(|c| c.index) else {
            continue;
        };

        let cells: Vec<CellValue> = table
            .column_cells(index)
            .map(|cell| match parse_date_cell(cell) {
                Some(dt) => CellValue::DateTime(dt),
                None => {
                    if !cell.is_null() {
                        blanked += 1;
                    }
                    CellValue::Empty
                }
            })
            .collect();

        debug!(column = %name, "date column normalized");
        table.replace_column(index, cells);
    }

    blanked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parses_iso_dates_and_timestamps() {
        assert_eq!(parse_date_str("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(
            parse_date_str("2024-01-05 13:45:10"),
            ymd(2024, 1, 5).checked_add_signed(Duration::seconds(13 * 3600 + 45 * 60 + 10))
        );
        assert_eq!(parse_date_str("2024/01/05"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_drops_timezone_keeping_wall_time() {
        assert_eq!(
            parse_date_str("2024-01-05T10:00:00-03:00"),
            ymd(2024, 1, 5).checked_add_signed(Duration::hours(10))
        );
    }

    #[test]
    fn test_slash_dates_prefer_month_first() {
        assert_eq!(parse_date_str("01/02/2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_str("25/12/2024"), Some(ymd(2024, 12, 25)));
    }

    #[test]
    fn test_serial_numbers_are_spreadsheet_dates() {
        assert_eq!(parse_date_cell(&CellValue::Integer(45296)), Some(ymd(2024, 1, 5)));
        assert_eq!(
            parse_date_cell(&CellValue::Float(45296.5)),
            ymd(2024, 1, 5).checked_add_signed(Duration::hours(12))
        );
        assert_eq!(parse_date_cell(&CellValue::Float(20240105.0)), None);
    }

    #[test]
    fn test_unreadable_values_are_none() {
        assert_eq!(parse_date_str("pendiente"), None);
        assert_eq!(parse_date_cell(&CellValue::Bool(true)), None);
        assert_eq!(parse_date_cell(&CellValue::Empty), None);
        assert_eq!(parse_date_str("   "), None);
    }

    #[test]
    fn test_normalizes_named_columns_only() {
        let mut table = Table::from_columns(
            "mem",
            vec![
                (
                    "Fecha",
                    vec![
                        CellValue::String("2024-01-05".into()),
                        CellValue::String("pendiente".into()),
                        CellValue::Empty,
                    ],
                ),
                ("Otro", vec![CellValue::String("2024-01-05".into())]),
            ],
        );

        let blanked = normalize_date_columns(&mut table, &["Fecha".to_string(), "Nope".to_string()]);

        assert_eq!(blanked, 1);
        assert_eq!(table.rows[0].cells[0], CellValue::DateTime(ymd(2024, 1, 5)));
        assert!(table.rows[1].cells[0].is_empty());
        assert_eq!(table.rows[0].cells[1], CellValue::String("2024-01-05".into()));
    }
}
