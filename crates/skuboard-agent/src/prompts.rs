//! Natural-language prompts sent to the agent apps.

use skuboard_core::dashboard::{cell_text, TimeWindow};
use skuboard_core::types::{Row, NAME_FIELD, SKU_FIELD};

/// How many SKUs the ranking prompt asks for.
pub const RANKED_SKU_COUNT: usize = 10;

/// Ask the ranking app for the worst performers over `window`, as raw JSON.
pub fn ranked_skus(window: TimeWindow) -> String {
    let months = window.months();
    let unit = if months == 1 { "month" } else { "months" };
    format!(
        "Return {RANKED_SKU_COUNT} least performing SKUs from the last {months} {unit} as a valid table format. \
         Do not include any text, explanation, markdown, or escape characters. \
         Output must be raw JSON only, like:[{{'sku': '12345','name': 'Product A','score': 98.7}}, ...]"
    )
}

/// Ask the notification app to email `comment` about `rows`.
pub fn notification(rows: &[&Row], comment: &str) -> String {
    let subject = if rows.is_empty() {
        "General comment on the SKU review (no SKU selected).".to_string()
    } else {
        let items: Vec<String> = rows.iter().map(|row| describe(row)).collect();
        format!("SKUs under review: {}.", items.join(", "))
    };
    format!(
        "Send an email notification to the SKU review team. {subject} Reviewer comment: {}",
        comment.trim()
    )
}

fn describe(row: &Row) -> String {
    let sku = cell_text(row, SKU_FIELD);
    let name = cell_text(row, NAME_FIELD);
    match (sku.is_empty(), name.is_empty()) {
        (false, false) => format!("{sku} ({name})"),
        (false, true) => sku,
        (true, false) => name,
        (true, true) => "unnamed SKU".to_string(),
    }
}
