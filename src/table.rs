//! Table projection: heterogeneous flat records to column-stable rows.
//!
//! The column set is the union of field names across the batch, with
//! [`STORE_FIELD`] forced first and the rest sorted lexicographically.
//! Missing fields render as empty cells; schemas are expected to differ
//! between records and never error.

use crate::flatten::{FlatRecord, STORE_FIELD};
use serde_json::Value;
use std::collections::BTreeSet;

/// One projected row, aligned to the batch's column set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Rendered cell values, one per column.
    pub cells: Vec<String>,
    /// Whether the source record was a synthetic error placeholder, for
    /// display highlighting.
    pub is_error: bool,
}

/// A column-stable projection of a flat record batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    /// Distinct column names: `Store` first, remainder lexicographic.
    pub columns: Vec<String>,
    /// Rows in input batch order.
    pub rows: Vec<TableRow>,
}

/// Compute the column set for a batch: `Store` first, then every other
/// field name seen in any record, sorted lexicographically.
pub fn columns_for(records: &[FlatRecord]) -> Vec<String> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.fields.keys())
        .map(String::as_str)
        .filter(|name| *name != STORE_FIELD)
        .collect();

    let mut columns = Vec::with_capacity(names.len() + 1);
    columns.push(STORE_FIELD.to_owned());
    columns.extend(names.into_iter().map(str::to_owned));
    columns
}

/// Project a batch of flat records into columns and aligned rows.
pub fn project(records: &[FlatRecord]) -> ResultTable {
    let columns = columns_for(records);
    let rows = records
        .iter()
        .map(|record| TableRow {
            cells: columns
                .iter()
                .map(|column| render_cell(record.get(column)))
                .collect(),
            is_error: record.is_error,
        })
        .collect();
    ResultTable { columns, rows }
}

/// Render one scalar cell. Absent and null values are empty; strings are
/// unquoted; anything else uses its JSON text.
pub(crate) fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
