//! Q-table export to CSV and JSON

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{Result, error::Error, q_learning::QTable};

/// A single row in the table export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QTableRecord {
    /// Board in row-major form, rows separated by `/`
    pub state: String,
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
    pub jump: bool,
    pub value: f64,
}

/// Exporter for learned Q-tables
pub struct QTableExporter;

impl QTableExporter {
    /// All stored entries, sorted by state then action
    pub fn records(table: &QTable) -> Vec<QTableRecord> {
        table
            .sorted_entries()
            .into_iter()
            .map(|(state, action, value)| {
                let (from_row, from_col, to_row, to_col) = action.as_tuple();
                QTableRecord {
                    state: state.to_string(),
                    from_row,
                    from_col,
                    to_row,
                    to_col,
                    jump: action.is_jump(),
                    value,
                }
            })
            .collect()
    }

    /// The `n` highest-valued entries, best first
    pub fn top(table: &QTable, n: usize) -> Vec<QTableRecord> {
        let mut records = Self::records(table);
        records.sort_by(|a, b| b.value.total_cmp(&a.value));
        records.truncate(n);
        records
    }

    /// Write every entry as CSV. Returns the number of rows written.
    pub fn export_csv(table: &QTable, path: &Path) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path)?;
        let records = Self::records(table);
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush CSV file {path:?}"),
            source,
        })?;
        Ok(records.len())
    }

    /// Write every entry as a pretty-printed JSON array. Returns the number
    /// of entries written.
    pub fn export_json(table: &QTable, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let records = Self::records(table);
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writer.flush()?;
        Ok(records.len())
    }
}
