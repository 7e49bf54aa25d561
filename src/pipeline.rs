//! Staged pipeline orchestration: raw → silver → gold → queries.
//!
//! Stages are strictly ordered and communicate only through the
//! persisted stage files; the modeler re-reads the silver layer and
//! the query stage re-reads the gold layer rather than reusing the
//! in-memory tables. That makes each stage a resume point: re-running
//! modeling does not require re-cleaning.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use crate::clean;
use crate::error::PipelineResult;
use crate::parser;
use crate::query::{self, GroupTotal};
use crate::report::Reporter;
use crate::schema::{self, DIMENSIONS, SALES_FACT};
use crate::store;
use crate::table::Table;

/// The five raw datasets, in processing order.
pub const SOURCES: [&str; 5] = ["sales", "customers", "products", "stores", "dates"];

/// Stage directory layout for one pipeline run.
#[derive(Debug, Clone)]
pub struct StagePaths {
    /// Raw CSV extracts (read-only inputs).
    pub raw: PathBuf,
    /// Cleaned tables, one `<name>_clean.csv` per source.
    pub silver: PathBuf,
    /// Star-schema tables under their fixed names.
    pub gold: PathBuf,
}

impl StagePaths {
    pub fn new(
        raw: impl Into<PathBuf>,
        silver: impl Into<PathBuf>,
        gold: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw: raw.into(),
            silver: silver.into(),
            gold: gold.into(),
        }
    }
}

/// Results of the three analytical queries over the gold layer.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub revenue_by_region: Vec<GroupTotal>,
    pub top_products: Vec<GroupTotal>,
    pub revenue_by_month: Vec<GroupTotal>,
}

/// Missing-value defaults for one source table.
///
/// Only sales has defined defaults today; extending another table is a
/// matter of adding its map here.
fn defaults_for(name: &str) -> HashMap<String, Value> {
    match name {
        "sales" => HashMap::from([
            ("quantity".to_string(), json!(0)),
            ("revenue".to_string(), json!(0)),
        ]),
        _ => HashMap::new(),
    }
}

/// Run the full pipeline: ingest, clean, model, query.
pub fn run(paths: &StagePaths, reporter: &dyn Reporter) -> PipelineResult<QueryReport> {
    run_clean(paths, reporter)?;
    run_model(paths, reporter)?;
    run_queries(paths, reporter)
}

/// Ingest the raw tables, clean them, and persist the silver layer.
pub fn run_clean(paths: &StagePaths, reporter: &dyn Reporter) -> PipelineResult<()> {
    reporter.info("Loading raw tables...");
    let mut tables = Vec::new();
    for name in SOURCES {
        let table = parser::read_table(&paths.raw.join(format!("{}.csv", name)), name)?;
        reporter.info(&format!("{}: {} rows", name, table.len()));
        tables.push(table);
    }

    reporter.info("Cleaning tables...");
    for table in &mut tables {
        let defaults = defaults_for(&table.name);
        let before = table.len();
        clean::clean_table(table, &defaults);
        if table.len() < before {
            reporter.info(&format!(
                "{}: dropped {} duplicate rows",
                table.name,
                before - table.len()
            ));
        }
        table.name = format!("{}_clean", table.name);
        store::save_table(table, &paths.silver)?;
    }
    reporter.success(&format!(
        "Cleaned tables saved to {}",
        paths.silver.display()
    ));

    Ok(())
}

/// Reload the silver layer, build the star schema, and persist the
/// gold layer.
pub fn run_model(paths: &StagePaths, reporter: &dyn Reporter) -> PipelineResult<()> {
    reporter.info("Loading cleaned tables...");
    let tables = load_silver(paths)?;

    reporter.info("Building star schema...");
    for spec in &DIMENSIONS {
        let dim = schema::build_dimension(&tables[spec.source], spec)?;
        reporter.info(&format!("{}: {} rows", dim.name, dim.len()));
        store::save_table(&dim, &paths.gold)?;
    }
    let fact = schema::build_fact(&tables[SALES_FACT.source], &SALES_FACT)?;
    reporter.info(&format!("{}: {} rows", fact.name, fact.len()));
    store::save_table(&fact, &paths.gold)?;

    reporter.success(&format!("Star schema saved to {}", paths.gold.display()));

    Ok(())
}

/// Reload the gold layer and run the three analytical queries.
pub fn run_queries(paths: &StagePaths, reporter: &dyn Reporter) -> PipelineResult<QueryReport> {
    reporter.info("Loading star schema...");
    let fact = load_gold(paths, SALES_FACT.name)?;
    let stores = load_gold(paths, "StoreDim")?;
    let products = load_gold(paths, "ProductDim")?;
    let dates = load_gold(paths, "DateDim")?;

    let report = QueryReport {
        revenue_by_region: query::revenue_by_region(&fact, &stores)?,
        top_products: query::top_products(&fact, &products)?,
        revenue_by_month: query::revenue_by_month(&fact, &dates)?,
    };

    report_totals(reporter, "Total revenue by region", &report.revenue_by_region);
    report_totals(reporter, "Top products by revenue", &report.top_products);
    report_totals(reporter, "Revenue by month", &report.revenue_by_month);

    Ok(report)
}

/// Reload the cleaned tables, keyed by source name.
///
/// Column names are normalized again on reload; the normalization is
/// idempotent, so already-clean headers pass through unchanged.
fn load_silver(paths: &StagePaths) -> PipelineResult<HashMap<String, Table>> {
    let mut tables = HashMap::new();
    for name in SOURCES {
        let path = paths.silver.join(format!("{}_clean.csv", name));
        let mut table = parser::read_table(&path, name)?;
        clean::normalize_columns(&mut table);
        tables.insert(name.to_string(), table);
    }
    Ok(tables)
}

fn load_gold(paths: &StagePaths, name: &str) -> PipelineResult<Table> {
    let path = paths.gold.join(format!("{}.csv", name));
    Ok(parser::read_table(&path, name)?)
}

fn report_totals(reporter: &dyn Reporter, title: &str, totals: &[GroupTotal]) {
    reporter.info(&format!("{}:", title));
    if totals.is_empty() {
        reporter.warning("(no matching rows)");
        return;
    }
    for group in totals {
        reporter.info(&format!("  {}: {}", group.key, format_total(group.total)));
    }
}

fn format_total(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{}", total as i64)
    } else {
        format!("{:.2}", total)
    }
}
