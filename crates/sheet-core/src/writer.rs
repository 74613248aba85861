//! CSV writer for cleaned tables

use crate::error::{Error, Result};
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a table to a CSV file
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_table(table, BufWriter::new(file), path)
}

/// Render a table as CSV text
pub fn write_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer, &table.source_path)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_table<W: Write>(table: &Table, writer: W, path: &Path) -> Result<()> {
    let csv_error = |e: csv::Error| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(csv_error)?;

    for row in &table.rows {
        csv_writer
            .write_record(row.cells.iter().map(|c| c.to_string_value()))
            .map_err(csv_error)?;
    }

    csv_writer.flush()?;
    Ok(())
}
