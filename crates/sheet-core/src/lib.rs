//! sheet-core: Core library for cleaning spreadsheet exports
//!
//! This library provides functionality to:
//! - Normalize column names (case, accents, padding) for keyword matching
//! - Parse locale-ambiguous numeric and currency text into numbers
//! - Classify columns as identifier, money or date columns
//! - Convert numeric-looking text columns of a table, all-or-nothing per column
//! - Normalize date columns and build display formats for the output sheet
//! - Read and write tables as CSV

pub mod classify;
pub mod convert;
pub mod dates;
pub mod error;
pub mod format;
pub mod normalize;
pub mod numeric;
pub mod parser;
pub mod pipeline;
pub mod profile;
pub mod scanner;
pub mod summary;
pub mod table;
pub mod writer;

pub use classify::{
    find_columns_by_keywords, is_force_numeric_column, is_money_column, ColumnClassifier,
    ColumnRole,
};
pub use convert::{
    convert_text_columns_to_numbers, convert_text_columns_with, plan_conversion,
    ColumnDecision, ColumnPlan,
};
pub use dates::{normalize_date_columns, parse_date_cell};
pub use error::{Error, Result};
pub use format::{build_format_plan, ColumnFormat, FormatPlan};
pub use normalize::{coerce_to_display_string, normalize_column_name};
pub use numeric::{convert_numeric_text, is_numeric_like, parse_numeric_text, ParsedNumber};
pub use parser::{parse_csv, parse_csv_str};
pub use pipeline::{converted_file_name, process_table, ProcessedTable};
pub use profile::ProcessingProfile;
pub use scanner::{scan_directory, ScanResult};
pub use summary::{summarize_column, ColumnSummary};
pub use table::{CellValue, Column, ColumnType, Row, Table};
pub use writer::{write_csv, write_csv_string};
