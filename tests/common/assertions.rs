//! Domain-specific assertion macros for skuboard harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! row, field or decode tier was wrong.

// ---------------------------------------------------------------------------
// Row assertions
// ---------------------------------------------------------------------------

/// Assert that a row has a field with an expected value.
///
/// ```rust
/// assert_has_field!(row, "status", "Active");
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($row:expr, $key:expr, $value:expr) => {{
        let row: &skuboard_core::Row = &$row;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match row.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  row[{:?}]\n  expected: {}\n  actual:   {}",
                key, expected, actual
            ),
            None => panic!(
                "assert_has_field! failed: field {:?} not found in row.\n  Available fields: {:?}",
                key,
                row.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert the `sku` values of a row sequence, in order.
#[macro_export]
macro_rules! assert_skus {
    ($rows:expr, [$($sku:expr),* $(,)?]) => {{
        let actual: Vec<String> = $rows
            .iter()
            .map(|r| skuboard_core::dashboard::cell_text(r, "sku"))
            .collect();
        let expected: Vec<String> = vec![$($sku.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_skus! failed: sku order differs");
    }};
}

// ---------------------------------------------------------------------------
// Decode assertions
// ---------------------------------------------------------------------------

/// Assert that `payload` decodes through `strategy` into `expected_len` rows.
#[macro_export]
macro_rules! assert_decoded_via {
    ($payload:expr, $strategy:expr, $expected_len:expr) => {{
        match skuboard_core::decode(&$payload) {
            Ok(decoded) => {
                if decoded.strategy != $strategy {
                    panic!(
                        "assert_decoded_via! failed: decoded via {} instead of {}\n  payload: {}",
                        decoded.strategy, $strategy, $payload
                    );
                }
                if decoded.rows.len() != $expected_len {
                    panic!(
                        "assert_decoded_via! failed: {} row(s) instead of {}\n  payload: {}",
                        decoded.rows.len(),
                        $expected_len,
                        $payload
                    );
                }
                decoded.rows
            }
            Err(error) => panic!(
                "assert_decoded_via! failed: payload did not decode ({error})\n  payload: {}",
                $payload
            ),
        }
    }};
}

/// Assert that every row carries a non-empty `id` and a `status`.
#[macro_export]
macro_rules! assert_decorated {
    ($rows:expr) => {{
        for (i, row) in $rows.iter().enumerate() {
            match row.get("id") {
                Some(serde_json::Value::String(s)) if !s.is_empty() => {}
                Some(serde_json::Value::Number(_)) => {}
                other => panic!("assert_decorated! failed: row {i} has id {other:?}\n  row: {row:?}"),
            }
            match row.get("status").and_then(serde_json::Value::as_str) {
                Some("Active") | Some("Discontinued") => {}
                other => {
                    panic!("assert_decorated! failed: row {i} has status {other:?}\n  row: {row:?}")
                }
            }
        }
    }};
}
