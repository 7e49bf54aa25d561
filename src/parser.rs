//! Raw table ingestion: delimited text files into in-memory tables.
//!
//! Cells are kept as raw strings. No semantic changes, no type
//! coercion beyond what delimited-text parsing itself implies.

use std::path::Path;

use serde_json::Value;

use crate::error::{CsvError, CsvResult};
use crate::table::{Row, Table};

/// Decode raw bytes as UTF-8.
///
/// A leading byte-order mark is consumed, so a file written with a BOM
/// upstream decodes to the same content as one written without.
/// Undecodable bytes become replacement characters rather than
/// aborting the read.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    text.into_owned()
}

/// Load a named dataset from a CSV file.
///
/// Fails with [`CsvError::Missing`] if the file does not exist and
/// [`CsvError::Parse`] if the content is not well-formed CSV.
pub fn read_table(path: &Path, name: &str) -> CsvResult<Table> {
    if !path.exists() {
        return Err(CsvError::Missing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    parse_table(&decode_bytes(&bytes), name)
}

/// Parse CSV content into a [`Table`].
///
/// The first record is the header; every following record must have
/// the same number of fields.
///
/// # Example
/// ```
/// use starmart::parse_table;
///
/// let table = parse_table("store_id,region\nS1,West\n", "stores").unwrap();
/// assert_eq!(table.columns, vec!["store_id", "region"]);
/// assert_eq!(table.rows[0]["region"], "West");
/// ```
pub fn parse_table(content: &str, name: &str) -> CsvResult<Table> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new().from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(name, headers);

    for record in reader.records() {
        let record = record.map_err(|e| CsvError::Parse(e.to_string()))?;
        let mut row = Row::new();
        for (header, field) in table.columns.iter().zip(record.iter()) {
            row.insert(header.clone(), Value::String(field.to_string()));
        }
        table.rows.push(row);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "sale_id,revenue\n1,20\n2,35\n";
        let table = parse_table(csv, "sales").unwrap();

        assert_eq!(table.name, "sales");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["sale_id"], "1");
        assert_eq!(table.rows[1]["revenue"], "35");
    }

    #[test]
    fn test_quoted_values() {
        let csv = "product_id,product_name\nP1,\"Widget, Large\"\n";
        let table = parse_table(csv, "products").unwrap();

        assert_eq!(table.rows[0]["product_name"], "Widget, Large");
    }

    #[test]
    fn test_missing_cells_kept_empty() {
        let csv = "sale_id,quantity,revenue\n1,,20\n";
        let table = parse_table(csv, "sales").unwrap();

        assert_eq!(table.rows[0]["quantity"], "");
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "a,b\n1,2,3\n";
        let result = parse_table(csv, "bad");
        assert!(matches!(result, Err(CsvError::Parse(_))));
    }

    #[test]
    fn test_empty_content_error() {
        assert!(matches!(parse_table("", "empty"), Err(CsvError::EmptyFile)));
        assert!(matches!(
            parse_table("  \n ", "empty"),
            Err(CsvError::EmptyFile)
        ));
    }

    #[test]
    fn test_missing_file_error() {
        let result = read_table(Path::new("no/such/dir/sales.csv"), "sales");
        assert!(matches!(result, Err(CsvError::Missing(_))));
    }

    #[test]
    fn test_bom_consumed_by_decode() {
        let bytes = b"\xef\xbb\xbfstore_id,region\nS1,West\n";
        let content = decode_bytes(bytes);
        let table = parse_table(&content, "stores").unwrap();

        assert_eq!(table.columns[0], "store_id");
    }
}
