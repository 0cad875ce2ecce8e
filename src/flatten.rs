//! Result flattening: nested JSON payloads to single-level field maps.
//!
//! Nested objects contribute dot-joined composite field names
//! (`dimensions.weight`); arrays are encoded as their canonical JSON text
//! rather than expanded; scalars pass through unchanged. The store tag is
//! surfaced under the display field name `Store`, and an error reason (if
//! any) under `errorReason`. Output order is the `BTreeMap` key order, so
//! identical input always yields identical output.

use crate::types::ResultRecord;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Separator joining nested keys into composite field names.
pub const KEY_SEPARATOR: char = '.';

/// Display field name carrying the store tag. Always the first column.
pub const STORE_FIELD: &str = "Store";

/// Display field name carrying the error reason of a synthetic record.
pub const ERROR_FIELD: &str = "errorReason";

/// A single-level view of one [`ResultRecord`]: composite field names mapped
/// to scalar values (arrays appear as JSON text).
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    /// Flattened fields, including [`STORE_FIELD`] and, for synthetic
    /// records, [`ERROR_FIELD`].
    pub fields: BTreeMap<String, Value>,
    /// Whether the source record was a synthetic error placeholder.
    pub is_error: bool,
}

impl FlatRecord {
    /// Look up a field by its flattened name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Flatten one record. Deterministic: identical input yields identical output.
pub fn flatten_record(record: &ResultRecord) -> FlatRecord {
    let mut fields = BTreeMap::new();
    flatten_into("", &record.fields, &mut fields);
    fields.insert(
        STORE_FIELD.to_owned(),
        Value::String(record.store_name.clone()),
    );
    if let Some(reason) = &record.error_reason {
        fields.insert(ERROR_FIELD.to_owned(), Value::String(reason.clone()));
    }
    FlatRecord {
        fields,
        is_error: record.error_reason.is_some(),
    }
}

/// Flatten an entire batch, preserving order.
pub fn flatten_batch(records: &[ResultRecord]) -> Vec<FlatRecord> {
    records.iter().map(flatten_record).collect()
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(&name, nested, out),
            Value::Array(_) => {
                let text = serde_json::to_string(value).unwrap_or_default();
                out.insert(name, Value::String(text));
            }
            scalar => {
                out.insert(name, scalar.clone());
            }
        }
    }
}
