//! Test builders — ergonomic constructors for rows, dashboards and agent
//! configs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use serde_json::{json, Value};
use skuboard_core::config::AgentConfig;
use skuboard_core::{decorate, Dashboard, PanelOptions, Row};

// ---------------------------------------------------------------------------
// RowBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Row`] fixtures.
///
/// # Example
///
/// ```rust
/// let row = RowBuilder::sku("00123")
///     .name("Product Alpha")
///     .field("score", 98.7)
///     .build();
/// ```
#[derive(Default)]
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sku(sku: &str) -> Self {
        Self::new().field("sku", sku)
    }

    pub fn name(self, name: &str) -> Self {
        self.field("name", name)
    }

    pub fn id(self, id: &str) -> Self {
        self.field("id", id)
    }

    pub fn status(self, status: &str) -> Self {
        self.field("status", status)
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.row.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> Row {
        self.row
    }
}

/// Undecorated rows for [`SAMPLE_SKUS`](super::fixtures::SAMPLE_SKUS).
pub fn sample_rows() -> Vec<Row> {
    super::fixtures::SAMPLE_SKUS
        .iter()
        .map(|(sku, name, score)| RowBuilder::sku(sku).name(name).field("score", *score).build())
        .collect()
}

/// Rows from a JSON array literal. Panics on anything else.
pub fn rows_from(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => row,
                other => panic!("rows_from: expected an object, got {other}"),
            })
            .collect(),
        other => panic!("rows_from: expected an array, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Dashboards
// ---------------------------------------------------------------------------

/// A dashboard-mode [`Dashboard`] loaded with the decorated sample rows.
pub fn sample_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new(PanelOptions::dashboard());
    dashboard.set_rows(decorate(sample_rows()));
    dashboard
}

// ---------------------------------------------------------------------------
// Agent config
// ---------------------------------------------------------------------------

/// An [`AgentConfig`] pointing at `url` with a fixed token and user id.
pub fn agent_config(url: &str) -> AgentConfig {
    AgentConfig {
        url: url.to_string(),
        token: "test-token".to_string(),
        user_id: "5139041".to_string(),
        timeout_secs: 5,
        ..AgentConfig::default()
    }
}

/// The reply envelope the agent endpoint wraps its text in.
pub fn envelope(text: impl Into<Value>) -> Value {
    json!({ "text": text.into() })
}
