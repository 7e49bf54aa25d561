//! Read-only aggregate queries over the persisted star schema.
//!
//! All three queries share one shape: inner-join the fact table to a
//! dimension on its surrogate key, group by a dimension attribute, sum
//! a fact measure. A fact row whose key has no dimension match is
//! silently excluded from that query's result; it never surfaces as an
//! error, only as missing aggregate mass.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaResult;
use crate::table::Table;

/// How many products the top-products query reports.
const TOP_PRODUCT_COUNT: usize = 3;

/// One group's summed measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Inner-join `fact` to `dim` on `join_key`, group by the dimension's
/// `group_column`, and sum the fact's `measure`.
///
/// Groups come back in first-appearance order over the fact rows.
pub fn join_sum(
    fact: &Table,
    dim: &Table,
    join_key: &str,
    group_column: &str,
    measure: &str,
) -> SchemaResult<Vec<GroupTotal>> {
    fact.require_column(join_key)?;
    fact.require_column(measure)?;
    dim.require_column(join_key)?;
    dim.require_column(group_column)?;

    let mut dim_index: HashMap<String, usize> = HashMap::new();
    for (i, row) in dim.rows.iter().enumerate() {
        if let Some(key) = key_text(row.get(join_key)) {
            dim_index.entry(key).or_insert(i);
        }
    }

    let mut totals: Vec<GroupTotal> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for row in &fact.rows {
        let key = match key_text(row.get(join_key)) {
            Some(key) => key,
            None => continue,
        };
        let dim_row = match dim_index.get(&key) {
            Some(&i) => &dim.rows[i],
            // Dangling key: the row drops out of this query entirely.
            None => continue,
        };
        let group = key_text(dim_row.get(group_column)).unwrap_or_default();
        let amount = measure_value(row.get(measure));

        match group_index.get(&group) {
            Some(&i) => totals[i].total += amount,
            None => {
                group_index.insert(group.clone(), totals.len());
                totals.push(GroupTotal {
                    key: group,
                    total: amount,
                });
            }
        }
    }

    Ok(totals)
}

/// Total revenue per store region, highest first.
pub fn revenue_by_region(fact: &Table, stores: &Table) -> SchemaResult<Vec<GroupTotal>> {
    let mut totals = join_sum(fact, stores, "store_key", "region", "revenue")?;
    sort_descending(&mut totals);
    Ok(totals)
}

/// The three products with the highest total revenue, highest first.
///
/// Equal totals keep first-appearance order over the fact rows; the
/// sort is stable, so no secondary key is involved.
pub fn top_products(fact: &Table, products: &Table) -> SchemaResult<Vec<GroupTotal>> {
    let mut totals = join_sum(fact, products, "product_key", "product_name", "revenue")?;
    sort_descending(&mut totals);
    totals.truncate(TOP_PRODUCT_COUNT);
    Ok(totals)
}

/// Total revenue per calendar month, in first-appearance order (no
/// sort).
pub fn revenue_by_month(fact: &Table, dates: &Table) -> SchemaResult<Vec<GroupTotal>> {
    join_sum(fact, dates, "date_key", "month", "revenue")
}

fn sort_descending(totals: &mut [GroupTotal]) {
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
}

/// A join or group cell as text. Null and absent cells yield no key.
fn key_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// A measure cell as a number. Cells that do not parse contribute 0,
/// matching the cleaner's fill-missing policy.
fn measure_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;
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

    fn store_dim() -> Table {
        table(
            "StoreDim",
            &["store_key", "store_name", "region"],
            &[
                &["S1", "Store One", "West"],
                &["S2", "Store Two", "East"],
                &["S3", "Store Three", "West"],
            ],
        )
    }

    fn fact(rows: &[&[&str]]) -> Table {
        table(
            "SalesFact",
            &["sale_id", "product_key", "store_key", "revenue"],
            rows,
        )
    }

    #[test]
    fn test_revenue_by_region_sums_and_sorts() {
        let fact = fact(&[
            &["1", "P1", "S1", "20"],
            &["2", "P1", "S2", "50"],
            &["3", "P2", "S3", "10"],
            &["4", "P2", "S2", "5"],
        ]);

        let totals = revenue_by_region(&fact, &store_dim()).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].key, "East");
        assert_eq!(totals[0].total, 55.0);
        assert_eq!(totals[1].key, "West");
        assert_eq!(totals[1].total, 30.0);
    }

    #[test]
    fn test_dangling_key_is_excluded() {
        let fact = fact(&[
            &["1", "P1", "S1", "20"],
            &["2", "P1", "S9", "1000"], // no such store
        ]);

        let totals = revenue_by_region(&fact, &store_dim()).unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].key, "West");
        assert_eq!(totals[0].total, 20.0);
    }

    #[test]
    fn test_region_with_no_sales_is_absent() {
        let fact = fact(&[&["1", "P1", "S1", "20"]]);

        let totals = revenue_by_region(&fact, &store_dim()).unwrap();

        // East has no matching fact rows: absent, not zero.
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].key, "West");
    }

    #[test]
    fn test_top_products_keeps_three() {
        let products = table(
            "ProductDim",
            &["product_key", "product_name"],
            &[
                &["P1", "Widget"],
                &["P2", "Gadget"],
                &["P3", "Sprocket"],
                &["P4", "Gizmo"],
            ],
        );
        let fact = fact(&[
            &["1", "P4", "S1", "10"],
            &["2", "P1", "S1", "100"],
            &["3", "P2", "S1", "80"],
            &["4", "P3", "S1", "50"],
        ]);

        let totals = top_products(&fact, &products).unwrap();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].key, "Widget");
        assert_eq!(totals[1].key, "Gadget");
        assert_eq!(totals[2].key, "Sprocket");
    }

    #[test]
    fn test_top_products_tie_keeps_first_appearance_order() {
        let products = table(
            "ProductDim",
            &["product_key", "product_name"],
            &[&["P1", "Widget"], &["P2", "Gadget"], &["P3", "Sprocket"]],
        );
        let fact = fact(&[
            &["1", "P2", "S1", "40"],
            &["2", "P1", "S1", "40"],
            &["3", "P3", "S1", "90"],
        ]);

        let totals = top_products(&fact, &products).unwrap();

        assert_eq!(totals[0].key, "Sprocket");
        // P2 appeared before P1 in the fact rows, so the tie resolves
        // to Gadget first.
        assert_eq!(totals[1].key, "Gadget");
        assert_eq!(totals[2].key, "Widget");
    }

    #[test]
    fn test_revenue_by_month_is_unsorted() {
        let dates = table(
            "DateDim",
            &["date_key", "month"],
            &[&["D1", "Mar"], &["D2", "Jan"]],
        );
        let fact = table(
            "SalesFact",
            &["sale_id", "date_key", "revenue"],
            &[
                &["1", "D1", "5"],
                &["2", "D2", "100"],
                &["3", "D1", "7"],
            ],
        );

        let totals = revenue_by_month(&fact, &dates).unwrap();

        // First-appearance order, even though Jan's total is larger.
        assert_eq!(totals[0].key, "Mar");
        assert_eq!(totals[0].total, 12.0);
        assert_eq!(totals[1].key, "Jan");
        assert_eq!(totals[1].total, 100.0);
    }

    #[test]
    fn test_unparseable_measure_counts_as_zero() {
        let fact = fact(&[&["1", "P1", "S1", "n/a"], &["2", "P1", "S1", "20"]]);

        let totals = revenue_by_region(&fact, &store_dim()).unwrap();

        assert_eq!(totals[0].total, 20.0);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let bad_dim = table("StoreDim", &["store_key"], &[]);
        let fact = fact(&[]);

        let err = revenue_by_region(&fact, &bad_dim).unwrap_err();
        assert!(err.to_string().contains("region"));
    }
}
