//! Display formats for the cleaned spreadsheet
//!
//! The plan is data only; a spreadsheet writer applies it to the output
//! sheet. Formats follow column roles: money columns get a currency format,
//! identifier columns a plain integer format, date columns `yyyy-mm-dd`.

use crate::classify::{ColumnClassifier, ColumnRole};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Number format for date columns
pub const DATE_FORMAT: &str = "yyyy-mm-dd";
/// Number format for identifier columns
pub const ID_FORMAT: &str = "0";
/// Number format for money columns
pub const MONEY_FORMAT: &str = "$ #,##0.00";

/// Width of columns without a role, and of date columns
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;
/// Width of identifier and money columns
pub const NARROW_COLUMN_WIDTH: f64 = 15.0;
/// Height of the header row
pub const HEADER_ROW_HEIGHT: f64 = 40.0;

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Flush left
    Left,
    /// Centered
    Center,
}

/// Style of the header row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderStyle {
    /// Row height in points
    pub row_height: f64,
    /// Wrap long header names onto several lines
    pub text_wrap: bool,
    /// Bold header text
    pub bold: bool,
    /// Horizontal alignment of header text
    pub align: Alignment,
    /// Center header text vertically
    pub vertical_center: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            row_height: HEADER_ROW_HEIGHT,
            text_wrap: true,
            bold: true,
            align: Alignment::Center,
            vertical_center: true,
        }
    }
}

/// Display settings for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFormat {
    /// Column name as in the header
    pub column: String,
    /// Column index (0-based)
    pub index: usize,
    /// Role that selected the format
    pub role: ColumnRole,
    /// Spreadsheet number format, if any
    pub num_format: Option<String>,
    /// Column width in character units
    pub width: f64,
    /// Cell alignment, if not the spreadsheet default
    pub align: Option<Alignment>,
}

impl ColumnFormat {
    fn for_role(column: &str, index: usize, role: ColumnRole) -> Self {
        let (num_format, width, align) = match role {
            ColumnRole::Monetary => (Some(MONEY_FORMAT), NARROW_COLUMN_WIDTH, None),
            ColumnRole::Identifier => (Some(ID_FORMAT), NARROW_COLUMN_WIDTH, Some(Alignment::Left)),
            ColumnRole::Date => (Some(DATE_FORMAT), DEFAULT_COLUMN_WIDTH, None),
            ColumnRole::Unclassified => (None, DEFAULT_COLUMN_WIDTH, None),
        };

        Self {
            column: column.to_string(),
            index,
            role,
            num_format: num_format.map(str::to_string),
            width,
            align,
        }
    }
}

/// Header style plus one format per column, in column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatPlan {
    /// Style applied to the header row
    pub header: HeaderStyle,
    /// Per-column formats, in column order
    pub columns: Vec<ColumnFormat>,
}

impl FormatPlan {
    /// Format of a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnFormat> {
        self.columns.iter().find(|c| c.column == name)
    }

    /// Names of the columns with a given role, in column order
    pub fn columns_with_role(&self, role: ColumnRole) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role == role)
            .map(|c| c.column.as_str())
            .collect()
    }
}

/// Build the display plan for a table
pub fn build_format_plan(table: &Table, classifier: &ColumnClassifier) -> FormatPlan {
    FormatPlan {
        header: HeaderStyle::default(),
        columns: table
            .columns
            .iter()
            .map(|c| ColumnFormat::for_role(&c.name, c.index, classifier.role(&c.name)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn plan_for(names: &[&str]) -> FormatPlan {
        let table = Table::from_columns(
            "mem",
            names.iter().map(|n| (*n, vec![CellValue::Empty])),
        );
        build_format_plan(&table, &ColumnClassifier::default())
    }

    #[test]
    fn test_formats_follow_roles() {
        let plan = plan_for(&[
            "Fecha de liberación",
            "Operacion ID",
            "Valor de la compra",
            "Descripcion",
        ]);

        let date = plan.column("Fecha de liberación").unwrap();
        assert_eq!(date.num_format.as_deref(), Some(DATE_FORMAT));
        assert_eq!(date.width, DEFAULT_COLUMN_WIDTH);

        let id = plan.column("Operacion ID").unwrap();
        assert_eq!(id.num_format.as_deref(), Some(ID_FORMAT));
        assert_eq!(id.align, Some(Alignment::Left));
        assert_eq!(id.width, NARROW_COLUMN_WIDTH);

        let money = plan.column("Valor de la compra").unwrap();
        assert_eq!(money.num_format.as_deref(), Some(MONEY_FORMAT));

        let other = plan.column("Descripcion").unwrap();
        assert_eq!(other.num_format, None);
        assert_eq!(other.width, DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_money_needs_exact_name() {
        let plan = plan_for(&["valor de compra extra", "Monto Neto de Operacion"]);
        assert_eq!(
            plan.columns_with_role(ColumnRole::Monetary),
            vec!["Monto Neto de Operacion"]
        );
    }

    #[test]
    fn test_header_style_defaults() {
        let plan = plan_for(&["a"]);
        assert_eq!(plan.header.row_height, HEADER_ROW_HEIGHT);
        assert!(plan.header.text_wrap);
        assert!(plan.header.bold);
        assert_eq!(plan.header.align, Alignment::Center);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = plan_for(&["Operacion ID"]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["columns"][0]["num_format"], "0");
        assert_eq!(json["columns"][0]["role"], "Identifier");
        assert_eq!(json["columns"][0]["align"], "left");
    }
}
