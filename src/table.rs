//! The uniform in-memory table container shared by all pipeline stages.
//!
//! Each row is a JSON object keyed by column name, as produced by CSV
//! parsing. JSON maps do not preserve insertion order, so the header
//! order lives in [`Table::columns`] and every writer follows it.

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// A single record: column name → cell value.
pub type Row = Map<String, Value>;

/// A named tabular dataset held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Dataset name (e.g. "sales", "sales_clean", "ProductDim").
    pub name: String,
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Records in file order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the header contains the given column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with a [`SchemaError::MissingColumn`] naming this table if
    /// the column is absent from the header.
    pub fn require_column(&self, column: &str) -> Result<(), SchemaError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(SchemaError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
        }
    }
}
