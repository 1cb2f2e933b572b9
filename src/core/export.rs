//! Whole-table export in canonical column order.
//!
//! The header row is `Index` followed by the canonical fields; exporting and
//! then importing the same file with every column mapped 1:1 reproduces the
//! field values (Index is regenerated on import, not preserved).

use crate::core::error::TrackerError;
use crate::core::schema;
use crate::core::table::Table;
use clap::ValueEnum;
use std::path::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated; opens directly in spreadsheet applications.
    Csv,
    /// Tab-separated.
    Tsv,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

/// Write the full table to `path` as a header row plus one row per record.
pub fn export_table(table: &Table, path: &Path, format: ExportFormat) -> Result<(), TrackerError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_path(path)?;

    let mut header = vec![schema::INDEX_COLUMN];
    header.extend(schema::field_names());
    writer.write_record(&header)?;

    for record in &table.records {
        let mut row = vec![record.index.to_string()];
        for name in schema::field_names() {
            row.push(record.value(name).to_string());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
