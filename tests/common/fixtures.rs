//! Static agent reply corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of reply `text` values in one
//! of the shapes the agent has been seen to produce. Every payload in the
//! decodable corpora describes the same three SKUs as [`SAMPLE_SKUS`].

/// `(sku, name, score)` of the rows every decodable corpus entry holds.
pub const SAMPLE_SKUS: &[(&str, &str, f64)] = &[
    ("00123", "Product Alpha", 98.7),
    ("00456", "Product Beta", 97.2),
    ("00789", "Product Gamma", 95.1),
];

/// Clean JSON text, recovered by strict parsing.
pub const CORPUS_CLEAN: &[&str] = &[
    r#"[{"sku":"00123","name":"Product Alpha","score":98.7},{"sku":"00456","name":"Product Beta","score":97.2},{"sku":"00789","name":"Product Gamma","score":95.1}]"#,
    r#"[
  {"sku": "00123", "name": "Product Alpha", "score": 98.7},
  {"sku": "00456", "name": "Product Beta", "score": 97.2},
  {"sku": "00789", "name": "Product Gamma", "score": 95.1}
]"#,
];

/// JSON serialized twice: one outer quote pair with escaped inner quotes.
pub const CORPUS_DOUBLE_ENCODED: &[&str] = &[
    r#""[{\"sku\":\"00123\",\"name\":\"Product Alpha\",\"score\":98.7},{\"sku\":\"00456\",\"name\":\"Product Beta\",\"score\":97.2},{\"sku\":\"00789\",\"name\":\"Product Gamma\",\"score\":95.1}]""#,
    r#""[{\"sku\": \"00123\", \"name\": \"Product Alpha\", \"score\": 98.7}, {\"sku\": \"00456\", \"name\": \"Product Beta\", \"score\": 97.2}, {\"sku\": \"00789\", \"name\": \"Product Gamma\", \"score\": 95.1}]""#,
];

/// Escaped quotes without an outer wrapper; only the last-resort repair
/// recovers these.
pub const CORPUS_LAST_RESORT: &[&str] = &[
    r#"[{\"sku\":\"00123\",\"name\":\"Product Alpha\",\"score\":98.7},{\"sku\":\"00456\",\"name\":\"Product Beta\",\"score\":97.2},{\"sku\":\"00789\",\"name\":\"Product Gamma\",\"score\":95.1}]"#,
    r#"[{\"sku\": \"00123\", \"name\": \"Product Alpha\", \"score\": 98.7},
{\"sku\": \"00456\", \"name\": \"Product Beta\", \"score\": 97.2},
{\"sku\": \"00789\", \"name\": \"Product Gamma\", \"score\": 95.1}]"#,
];

/// Replies nothing can recover rows from.
pub const CORPUS_GARBAGE: &[&str] = &[
    "",
    "not json at all",
    "I could not find any SKUs for that period.",
    "[{'sku': '00123', 'name': 'Product Alpha', 'score': 98.7}]",
    "42",
    r#""just a quoted sentence""#,
    r#"{"sku": "00123""#,
];

/// Double-encoded replies whose values legitimately contain quotes. The
/// repair tiers cannot tell these apart from spurious ones.
pub const CORPUS_EMBEDDED_QUOTES: &[&str] = &[
    r#""[{"sku": "00123", "name": "the \"big\" lamp"}]""#,
    r#"[{\"sku\": \"00123\", \"name\": \"12\\\" ruler\"}]"#,
];

/// A clean JSON reply of `n` synthetic rows, for volume tests.
pub fn clean_reply(n: usize) -> String {
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "sku": format!("{i:05}"),
                "name": format!("Product {i}"),
                "score": 100.0 - (i as f64) / 10.0,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}

/// [`clean_reply`] double-encoded the way the agent sometimes returns it.
pub fn double_encoded_reply(n: usize) -> String {
    serde_json::Value::String(clean_reply(n)).to_string()
}
