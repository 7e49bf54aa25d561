//! Star-schema construction: declarative dimension and fact specs.
//!
//! Each output table is described by a spec (source table, key rename,
//! output column list) and built by one projection routine, so all
//! five tables get identical behavior. The surrogate keys are direct
//! copies of the natural ids; nothing here joins, filters, or
//! deduplicates, so the fact table stays referentially consistent
//! with the dimensions by construction.

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::table::{Row, Table};

/// Spec for one dimension table: a column projection plus a rename of
/// the natural identifier into a surrogate key.
#[derive(Debug, Clone, Copy)]
pub struct DimensionSpec {
    /// Output table name (also the gold-layer file stem).
    pub name: &'static str,
    /// Cleaned source table name.
    pub source: &'static str,
    /// Natural identifier column in the source.
    pub natural_id: &'static str,
    /// Surrogate key column in the output.
    pub surrogate_key: &'static str,
    /// Output columns in header order; includes the surrogate key.
    pub columns: &'static [&'static str],
}

/// Spec for the fact table: foreign-id renames plus a projection.
#[derive(Debug, Clone, Copy)]
pub struct FactSpec {
    pub name: &'static str,
    pub source: &'static str,
    /// Natural id → surrogate key renames.
    pub key_renames: &'static [(&'static str, &'static str)],
    /// Output columns in header order.
    pub columns: &'static [&'static str],
}

/// The four dimension tables of the sales star schema.
pub const DIMENSIONS: [DimensionSpec; 4] = [
    DimensionSpec {
        name: "ProductDim",
        source: "products",
        natural_id: "product_id",
        surrogate_key: "product_key",
        columns: &["product_key", "product_name", "category", "brand"],
    },
    DimensionSpec {
        name: "CustomerDim",
        source: "customers",
        natural_id: "customer_id",
        surrogate_key: "customer_key",
        columns: &["customer_key", "name", "gender", "city", "join_date"],
    },
    DimensionSpec {
        name: "StoreDim",
        source: "stores",
        natural_id: "store_id",
        surrogate_key: "store_key",
        columns: &["store_key", "store_name", "region"],
    },
    DimensionSpec {
        name: "DateDim",
        source: "dates",
        natural_id: "date_id",
        surrogate_key: "date_key",
        columns: &["date_key", "date", "month", "year"],
    },
];

/// The sales fact table.
pub const SALES_FACT: FactSpec = FactSpec {
    name: "SalesFact",
    source: "sales",
    key_renames: &[
        ("product_id", "product_key"),
        ("customer_id", "customer_key"),
        ("store_id", "store_key"),
        ("date_id", "date_key"),
    ],
    columns: &[
        "sale_id",
        "date_key",
        "product_key",
        "customer_key",
        "store_key",
        "quantity",
        "revenue",
    ],
};

impl DimensionSpec {
    fn source_column(&self, output: &'static str) -> &'static str {
        if output == self.surrogate_key {
            self.natural_id
        } else {
            output
        }
    }
}

impl FactSpec {
    fn source_column(&self, output: &'static str) -> &'static str {
        self.key_renames
            .iter()
            .find(|(_, to)| *to == output)
            .map(|(from, _)| *from)
            .unwrap_or(output)
    }
}

/// Build a dimension table from its cleaned source.
///
/// No deduplication (done upstream) and no row filtering: row count
/// and order are 1:1 with the source.
pub fn build_dimension(source: &Table, spec: &DimensionSpec) -> SchemaResult<Table> {
    project(source, spec.name, spec.columns, |output| {
        spec.source_column(output)
    })
}

/// Build the fact table from the cleaned sales table.
///
/// A pure column transformation, not a join: row count and order are
/// 1:1 with the source, and each surrogate key is the unmodified
/// natural id.
pub fn build_fact(source: &Table, spec: &FactSpec) -> SchemaResult<Table> {
    project(source, spec.name, spec.columns, |output| {
        spec.source_column(output)
    })
}

fn project(
    source: &Table,
    name: &str,
    columns: &'static [&'static str],
    source_column: impl Fn(&'static str) -> &'static str,
) -> SchemaResult<Table> {
    for &column in columns {
        source.require_column(source_column(column))?;
    }

    let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
    for row in &source.rows {
        let mut out = Row::new();
        for &column in columns {
            let value = row
                .get(source_column(column))
                .cloned()
                .unwrap_or(Value::Null);
            out.insert(column.to_string(), value);
        }
        table.rows.push(out);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
        for cells in rows {
            let row: Row = columns
                .iter()
                .zip(cells.iter())
                .map(|(c, v)| (c.to_string(), json!(v)))
                .collect();
            table.rows.push(row);
        }
        table
    }

    fn products() -> Table {
        table(
            "products",
            &["product_id", "product_name", "category", "brand"],
            &[
                &["P1", "Widget", "Tools", "Acme"],
                &["P2", "Gadget", "Toys", "Globex"],
            ],
        )
    }

    #[test]
    fn test_build_dimension_renames_key() {
        let spec = &DIMENSIONS[0];
        let dim = build_dimension(&products(), spec).unwrap();

        assert_eq!(dim.name, "ProductDim");
        assert_eq!(
            dim.columns,
            vec!["product_key", "product_name", "category", "brand"]
        );
        assert_eq!(dim.len(), 2);
        assert_eq!(dim.rows[0]["product_key"], "P1");
        assert_eq!(dim.rows[1]["product_key"], "P2");
        assert!(dim.rows[0].get("product_id").is_none());
    }

    #[test]
    fn test_build_dimension_missing_column() {
        let source = table("products", &["product_id", "product_name"], &[]);
        let err = build_dimension(&source, &DIMENSIONS[0]).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("products"));
        assert!(msg.contains("category"));
    }

    #[test]
    fn test_build_fact_referential_projection() {
        let sales = table(
            "sales",
            &[
                "sale_id",
                "date_id",
                "product_id",
                "customer_id",
                "store_id",
                "quantity",
                "revenue",
            ],
            &[
                &["1", "D1", "P1", "C1", "S1", "2", "20"],
                &["2", "D2", "P2", "C2", "S2", "1", "35"],
            ],
        );

        let fact = build_fact(&sales, &SALES_FACT).unwrap();

        assert_eq!(fact.name, "SalesFact");
        assert_eq!(fact.len(), sales.len());
        // Every surrogate key equals the originating natural id.
        for (fact_row, sales_row) in fact.rows.iter().zip(sales.rows.iter()) {
            for (from, to) in SALES_FACT.key_renames {
                assert_eq!(fact_row[*to], sales_row[*from]);
            }
        }
        assert_eq!(fact.rows[0]["sale_id"], "1");
        assert_eq!(fact.rows[0]["quantity"], "2");
    }

    #[test]
    fn test_build_fact_missing_join_column() {
        let sales = table("sales", &["sale_id", "quantity", "revenue"], &[]);
        let err = build_fact(&sales, &SALES_FACT).unwrap_err();

        assert!(err.to_string().contains("date_id"));
    }

    #[test]
    fn test_fact_header_order() {
        let sales = table(
            "sales",
            &[
                "revenue",
                "quantity",
                "store_id",
                "customer_id",
                "product_id",
                "date_id",
                "sale_id",
            ],
            &[],
        );

        let fact = build_fact(&sales, &SALES_FACT).unwrap();
        // Output order comes from the spec, not the source.
        assert_eq!(
            fact.columns,
            vec![
                "sale_id",
                "date_key",
                "product_key",
                "customer_key",
                "store_key",
                "quantity",
                "revenue"
            ]
        );
    }
}
