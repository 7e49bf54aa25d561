//! # Starmart - staged sales data-mart builder
//!
//! Starmart ingests raw sales CSV extracts (transactions plus their
//! customer, product, store and date reference tables), cleans them,
//! reshapes them into a star schema and runs a set of aggregate
//! queries over the result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌─────────┐
//! │ Raw CSVs │────▶│  Silver  │────▶│     Gold     │────▶│ Queries │
//! │  (data/) │     │ cleaned  │     │ star schema  │     │ (sums)  │
//! └──────────┘     └──────────┘     └──────────────┘     └─────────┘
//! ```
//!
//! Each stage persists its output and the next stage re-reads it from
//! disk, so every stage boundary is a resume point.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use starmart::{pipeline, ConsoleReporter, StagePaths};
//!
//! fn main() {
//!     let paths = StagePaths::new("data", "silver", "gold");
//!     let report = pipeline::run(&paths, &ConsoleReporter).unwrap();
//!     println!("{} regions", report.revenue_by_region.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`table`] - In-memory table container
//! - [`parser`] - CSV ingestion
//! - [`clean`] - Normalization, deduplication, null-fill
//! - [`store`] - Stage persistence
//! - [`schema`] - Star-schema specs and construction
//! - [`query`] - Aggregate queries over the star schema
//! - [`report`] - Progress reporting
//! - [`pipeline`] - Staged orchestration

// Core modules
pub mod error;
pub mod table;

// Ingestion
pub mod parser;

// Cleaning
pub mod clean;

// Persistence
pub mod store;

// Star schema
pub mod schema;

// Queries
pub mod query;

// Reporting
pub mod report;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult, PipelineError, PipelineResult, SchemaError, SchemaResult, StoreError,
    StoreResult,
};

// =============================================================================
// Re-exports - Table
// =============================================================================

pub use table::{Row, Table};

// =============================================================================
// Re-exports - Ingestion
// =============================================================================

pub use parser::{decode_bytes, parse_table, read_table};

// =============================================================================
// Re-exports - Cleaning
// =============================================================================

pub use clean::{clean_table, deduplicate, fill_missing, normalize_columns, normalize_name};

// =============================================================================
// Re-exports - Persistence
// =============================================================================

pub use store::save_table;

// =============================================================================
// Re-exports - Star schema
// =============================================================================

pub use schema::{build_dimension, build_fact, DimensionSpec, FactSpec, DIMENSIONS, SALES_FACT};

// =============================================================================
// Re-exports - Queries
// =============================================================================

pub use query::{join_sum, revenue_by_month, revenue_by_region, top_products, GroupTotal};

// =============================================================================
// Re-exports - Reporting
// =============================================================================

pub use report::{ConsoleReporter, LogEntry, LogLevel, Reporter, SilentReporter};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run, run_clean, run_model, run_queries, QueryReport, StagePaths, SOURCES};
