//! Row decoration integration harness.
//!
//! # What this covers
//!
//! - **Identifier assignment**: `id` comes from `sku`, else `row-{index}`;
//!   existing ids survive.
//! - **Status assignment**: missing or empty statuses become `Active`;
//!   existing statuses survive.
//! - **Field order**: added fields follow the agent's own fields.
//! - **Idempotence**: decorating twice is the same as decorating once.
//!
//! # Running
//!
//! ```sh
//! cargo test --test decoration_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use skuboard_core::{decorate, Row, RowStatus};

#[test]
fn sample_rows_get_sku_ids_and_active_status() {
    let rows = decorate(sample_rows());
    assert_decorated!(rows);
    for (row, (sku, _, _)) in rows.iter().zip(SAMPLE_SKUS) {
        assert_has_field!(row, "id", *sku);
        assert_has_field!(row, "status", "Active");
        assert_eq!(RowStatus::of(row), RowStatus::Active);
    }
}

#[rstest]
#[case::missing_sku(RowBuilder::new().name("Lamp").build(), json!("row-2"))]
#[case::empty_sku(RowBuilder::sku("").name("Lamp").build(), json!("row-2"))]
#[case::null_sku(RowBuilder::new().field("sku", Value::Null).build(), json!("row-2"))]
#[case::numeric_sku(RowBuilder::new().field("sku", 456).build(), json!(456))]
#[case::empty_id(RowBuilder::sku("00123").id("").build(), json!("00123"))]
#[case::existing_id(RowBuilder::sku("00123").id("keep-me").build(), json!("keep-me"))]
fn id_assignment(#[case] row: Row, #[case] expected: Value) {
    let mut rows = sample_rows();
    rows.truncate(2);
    rows.push(row);
    let rows = decorate(rows);
    assert_eq!(rows[2]["id"], expected);
}

#[rstest]
#[case::missing(RowBuilder::sku("1").build(), "Active")]
#[case::empty(RowBuilder::sku("1").status("").build(), "Active")]
#[case::discontinued(RowBuilder::sku("1").status("Discontinued").build(), "Discontinued")]
#[case::other(RowBuilder::sku("1").status("Pending").build(), "Pending")]
fn status_assignment(#[case] row: Row, #[case] expected: &str) {
    let rows = decorate(vec![row]);
    assert_has_field!(rows[0], "status", expected);
}

#[test]
fn added_fields_follow_agent_fields() {
    let rows = decorate(vec![RowBuilder::new()
        .field("score", 12.5)
        .field("sku", "00123")
        .build()]);
    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["score", "sku", "id", "status"]);
}

#[test]
fn positions_count_from_zero_within_the_sequence() {
    let rows = decorate(rows_from(json!([{"name": "a"}, {"name": "b"}, {"name": "c"}])));
    let ids: Vec<&Value> = rows.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, vec![&json!("row-0"), &json!("row-1"), &json!("row-2")]);
}

#[test]
fn decorating_twice_is_a_no_op() {
    let once = decorate(rows_from(json!([
        {"sku": "00123", "name": "Product Alpha"},
        {"name": "nameless"},
        {"sku": "00789", "status": "Discontinued"}
    ])));
    let twice = decorate(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn empty_input_stays_empty() {
    assert!(decorate(Vec::new()).is_empty());
}
