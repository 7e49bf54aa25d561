//! Error types for the star-schema pipeline.
//!
//! This module defines the pipeline's error hierarchy:
//!
//! - [`CsvError`] - reading and parsing delimited source files
//! - [`SchemaError`] - expected columns absent from a table
//! - [`StoreError`] - persisting stage outputs
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error is fatal:
//! the pipeline has no retry policy and no partial-success mode.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a delimited source file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Required input or intermediate file does not exist.
    #[error("Source file not found: {}", .0.display())]
    Missing(PathBuf),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited content.
    #[error("Invalid CSV format: {0}")]
    Parse(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors when a table is missing an expected column.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A selected or join column is absent after name normalization.
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors while persisting a stage output.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Stage directory could not be created.
    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Table file could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: csv::Error },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by the stage entry points in
/// [`crate::pipeline`]. It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Missing column error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Persistence error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
