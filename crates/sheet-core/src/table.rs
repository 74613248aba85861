//! Core table types for representing spreadsheet data

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed table from a single tabular file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Column definitions, in file order
    pub columns: Vec<Column>,
    /// Row data
    pub rows: Vec<Row>,
    /// Source file path
    pub source_path: PathBuf,
}

impl Table {
    /// Build a table from named column vectors.
    ///
    /// Columns shorter than the longest one are padded with `Empty`.
    pub fn from_columns<I, S>(source_path: impl Into<PathBuf>, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<Vec<CellValue>>) = columns
            .into_iter()
            .map(|(name, cells)| (name.into(), cells))
            .unzip();

        let row_count = values.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows: Vec<Row> = (0..row_count)
            .map(|_| Row::new(Vec::with_capacity(names.len())))
            .collect();

        for column in values {
            let mut cells = column.into_iter();
            for row in &mut rows {
                row.cells.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Self {
            columns: names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Column::new(name, i))
                .collect(),
            rows,
            source_path: source_path.into(),
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over the cells of one column, top to bottom
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |r| r.cells.get(index).unwrap_or(&CellValue::Empty))
    }

    /// Infer the storage type of a column from its cells
    pub fn column_type(&self, index: usize) -> ColumnType {
        ColumnType::infer(self.column_cells(index))
    }

    /// Replace every cell of a column; `cells` must hold one value per row
    pub(crate) fn replace_column(&mut self, index: usize, cells: Vec<CellValue>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            if let Some(slot) = row.cells.get_mut(index) {
                *slot = cell;
            }
        }
    }
}

/// A column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in the header row
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Cell values for each column
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }
}

/// A cell value as produced by the table reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Date or timestamp value
    DateTime(NaiveDateTime),
    /// String value
    String(String),
    /// Empty/null cell
    Empty,
}

impl CellValue {
    /// Parse a raw field into a CellValue, typing it the way a spreadsheet
    /// reader types cells.
    ///
    /// Digit strings with leading zeros (`"000123"`) stay strings, as they
    /// do when a spreadsheet cell is stored as text.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if !is_plain_number(trimmed) {
            if trimmed.eq_ignore_ascii_case("true") {
                return CellValue::Bool(true);
            }
            if trimmed.eq_ignore_ascii_case("false") {
                return CellValue::Bool(false);
            }
            return CellValue::String(trimmed.to_string());
        }

        if has_leading_zero(trimmed) {
            return CellValue::String(trimmed.to_string());
        }

        // Try parsing as integer first
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }

        // Try parsing as float
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        CellValue::String(trimmed.to_string())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell counts as missing: empty, or a NaN float
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric value of an Integer or Float cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to a display string
    pub fn to_string_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Float(f) if f.is_nan() => String::new(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::DateTime(dt) => {
                if dt.time().num_seconds_from_midnight() == 0 && dt.time().nanosecond() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Empty => write!(f, ""),
        }
    }
}

/// Storage type of a whole column, inferred from its non-null cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every non-null cell is an integer or float (also: no non-null cells)
    Numeric,
    /// Every non-null cell is a boolean
    Boolean,
    /// Every non-null cell is a date/timestamp
    DateTime,
    /// Strings, or a mix of cell kinds
    Text,
}

impl ColumnType {
    /// Infer the column type from an iterator over its cells
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut inferred: Option<ColumnType> = None;

        for cell in cells {
            let kind = match cell {
                c if c.is_null() => continue,
                CellValue::Integer(_) | CellValue::Float(_) => ColumnType::Numeric,
                CellValue::Bool(_) => ColumnType::Boolean,
                CellValue::DateTime(_) => ColumnType::DateTime,
                _ => return ColumnType::Text,
            };

            match inferred {
                None => inferred = Some(kind),
                Some(existing) if existing == kind => {}
                Some(_) => return ColumnType::Text,
            }
        }

        inferred.unwrap_or(ColumnType::Numeric)
    }

    /// Whether the column already holds numbers (booleans included)
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Numeric | ColumnType::Boolean)
    }
}

/// Digits with an optional sign, fraction and exponent
fn is_plain_number(s: &str) -> bool {
    let body = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
}

/// `"007"` has a leading zero, `"0"` and `"0.5"` do not
fn has_leading_zero(s: &str) -> bool {
    let body = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    let mut chars = body.chars();
    chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit())
}
