//! Row decoration — make sure every recovered row carries an `id` and a
//! `status` before it reaches the table.
//!
//! A row whose `id` is missing or empty takes its `sku` when that is set,
//! otherwise `row-{index}`. A row whose `status` is missing or empty becomes
//! `Active`. Fields added here are appended after the agent's own fields.
//! Decoration is idempotent.

use crate::types::{is_truthy, Row, RowStatus, ID_FIELD, SKU_FIELD, STATUS_FIELD};
use serde_json::Value;

/// Decorate every row in place order.
pub fn decorate(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| decorate_row(row, index))
        .collect()
}

/// Decorate a single row found at `index` of the recovered sequence.
pub fn decorate_row(mut row: Row, index: usize) -> Row {
    if !is_truthy(row.get(ID_FIELD)) {
        let id = match row.get(SKU_FIELD) {
            Some(sku) if is_truthy(Some(sku)) => sku.clone(),
            _ => Value::String(format!("row-{index}")),
        };
        row.insert(ID_FIELD.to_string(), id);
    }
    if !is_truthy(row.get(STATUS_FIELD)) {
        row.insert(
            STATUS_FIELD.to_string(),
            Value::String(RowStatus::Active.as_str().to_string()),
        );
    }
    row
}
