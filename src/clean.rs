//! Cleaning stage: column normalization, deduplication, null-fill.
//!
//! The three operations are pure per-table transforms. They carry no
//! cross-table logic, so the pipeline applies them uniformly over the
//! whole dataset with only the default map varying by table.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::table::{Row, Table};

/// Real UTF-8 byte-order mark, as decoded from a `utf-8-sig` file.
const BOM: char = '\u{feff}';
/// The same mark mis-decoded as Latin-1 somewhere upstream.
const BOM_MOJIBAKE: &str = "\u{ef}\u{bb}\u{bf}";

/// Normalize a column name: strip BOM artifacts, trim surrounding
/// whitespace, lowercase, replace internal spaces with underscores.
///
/// Idempotent: applying it to an already-normalized name is a no-op,
/// so the pipeline can re-apply it on reload unconditionally.
///
/// # Example
/// ```
/// use starmart::normalize_name;
///
/// assert_eq!(normalize_name("\u{feff} Store ID "), "store_id");
/// assert_eq!(normalize_name("store_id"), "store_id");
/// ```
pub fn normalize_name(raw: &str) -> String {
    raw.replace(BOM, "")
        .replace(BOM_MOJIBAKE, "")
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Apply [`normalize_name`] to every column of a table, renaming the
/// row keys to match.
pub fn normalize_columns(table: &mut Table) {
    table.columns = table.columns.iter().map(|c| normalize_name(c)).collect();
    for row in &mut table.rows {
        let old = std::mem::take(row);
        for (key, value) in old {
            row.insert(normalize_name(&key), value);
        }
    }
}

/// Remove rows that are exact duplicates of an earlier row across all
/// columns. The first occurrence is retained; row order is preserved.
pub fn deduplicate(table: &mut Table) {
    let mut seen = HashSet::new();
    table.rows.retain(|row| {
        // Map keys are sorted, so serialization is canonical per row.
        let fingerprint = serde_json::to_string(row).unwrap_or_default();
        seen.insert(fingerprint)
    });
}

/// Replace missing values with defaults, per the {column → default}
/// map. A cell is missing if the key is absent, the value is null, or
/// the cell is blank. Other fields are untouched.
pub fn fill_missing(table: &mut Table, defaults: &HashMap<String, Value>) {
    if defaults.is_empty() {
        return;
    }
    for row in &mut table.rows {
        for (column, default) in defaults {
            if is_missing(row, column) {
                row.insert(column.clone(), default.clone());
            }
        }
    }
}

fn is_missing(row: &Row, column: &str) -> bool {
    match row.get(column) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Clean one table: normalize the header, drop duplicate rows, fill
/// defined missing values.
///
/// Normalization runs first so the default map addresses normalized
/// column names; deduplication compares whole rows and is insensitive
/// to header renames.
pub fn clean_table(table: &mut Table, defaults: &HashMap<String, Value>) {
    normalize_columns(table);
    deduplicate(table);
    fill_missing(table, defaults);
}
