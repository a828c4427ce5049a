//! Core types for skuboard-core.
//!
//! This module defines the data shared across the workspace: the untrusted
//! [`RawAgentPayload`] handed back by the agent endpoint, the [`Row`] record
//! the table displays, and the [`RowStatus`] values decoration assigns.

use serde_json::{Map, Value};

/// The unprocessed `text` value returned by the agent endpoint.
///
/// Semantically `string | sequence<Row> | Row | null`. No structural
/// guarantee; an absent field is represented as [`Value::Null`].
pub type RawAgentPayload = Value;

/// One record describing a single SKU's performance metrics and metadata.
///
/// Field order follows the agent's output (`serde_json` is built with
/// `preserve_order`), which is also the column order of the table.
pub type Row = Map<String, Value>;

/// Field holding the stable row identifier assigned by decoration.
pub const ID_FIELD: &str = "id";
/// Field holding the row's [`RowStatus`].
pub const STATUS_FIELD: &str = "status";
/// Domain key used to synthesize identifiers.
pub const SKU_FIELD: &str = "sku";
/// Display name of the SKU.
pub const NAME_FIELD: &str = "name";

/// Lifecycle status of a row as shown in the table's status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Active,
    Discontinued,
}

impl RowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RowStatus::Active => "Active",
            RowStatus::Discontinued => "Discontinued",
        }
    }

    /// Read the status of a row. Anything other than `"Discontinued"` counts
    /// as active, matching how the table colours the status chip.
    pub fn of(row: &Row) -> Self {
        match row.get(STATUS_FIELD).and_then(Value::as_str) {
            Some("Discontinued") => RowStatus::Discontinued,
            _ => RowStatus::Active,
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a row, rendered as text.
///
/// Decoration may leave a numeric `sku` as the id, so ids are compared by
/// their display form.
pub fn row_id(row: &Row) -> Option<String> {
    match row.get(ID_FIELD)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// JavaScript-style truthiness, used wherever a field counts as "missing"
/// when it is present but empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
