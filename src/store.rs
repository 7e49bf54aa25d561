//! Stage persistence: write tables to a stage directory as CSV.
//!
//! Stages communicate only through these files. The silver and gold
//! layers are each written once and re-read by the next stage, which
//! makes every stage boundary a resume point.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::table::Table;

/// Write a table to `<dir>/<table.name>.csv`, creating the directory
/// if needed.
///
/// The header row follows the table's column order; data rows keep
/// their in-memory order. Returns the path written.
pub fn save_table(table: &Table, dir: &Path) -> StoreResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.csv", table.name));
    write_csv(table, &path).map_err(|source| StoreError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

fn write_csv(table: &Table, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|column| cell_text(row.get(column)))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Render a cell for delimited-text output. Missing and null cells
/// become the empty string; numbers keep their JSON rendering.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
