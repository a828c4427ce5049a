//! Normalizer — coerces the agent's free-text reply into structured [`Row`]s.
//!
//! The agent endpoint has no response schema. Depending on the run it returns
//! clean JSON, JSON double-encoded as a quoted string, or JSON with
//! inconsistent escaping. Decoding tries an ordered list of named
//! [`Strategy`] values and the first one that yields rows wins:
//!
//! ```text
//! Structured ──► StrictText ──► QuotedUnescape ──► LastResort ──► []
//! ```
//!
//! [`decode`] reports which strategy succeeded (or every failure);
//! [`normalize`] is the boundary the rest of the workspace uses and never
//! fails — total exhaustion yields an empty sequence.

use crate::types::{RawAgentPayload, Row};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Matches text whose full extent is wrapped in one pair of `"` characters.
/// `.` does not cross line breaks, so multi-line text never matches.
fn quoted_re() -> &'static Regex {
    static QUOTED_RE: OnceLock<Regex> = OnceLock::new();
    QUOTED_RE.get_or_init(|| Regex::new(r#"^"(.*)"$"#).expect("valid quoted-payload regex"))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a decode attempt failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The strategy does not handle this payload shape; the pipeline moves on
    /// without recording an attempt.
    #[error("strategy not applicable: {0}")]
    NotApplicable(&'static str),

    /// Strict parsing succeeded but produced something other than a row or a
    /// sequence of rows.
    #[error("expected a row or a sequence of rows, found {found}")]
    Shape { found: &'static str },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is neither text nor structured data (`null`, a number, a
    /// boolean). No strategy is attempted.
    #[error("unsupported payload: {found}")]
    Unsupported { found: &'static str },

    /// Every applicable strategy failed.
    #[error("all decode strategies failed ({} attempted)", attempts.len())]
    Exhausted { attempts: Vec<Attempt> },
}

/// One failed strategy, kept for diagnostics.
#[derive(Debug)]
pub struct Attempt {
    pub strategy: Strategy,
    pub error: DecodeError,
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A single named decode tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The payload already is a sequence of rows or a single row.
    Structured,
    /// The payload is text holding valid JSON.
    StrictText,
    /// The text is wrapped in one outer quote pair: strip it, delete every
    /// backslash, parse.
    QuotedUnescape,
    /// Replace every escaped or bare quote with a plain quote, strip one outer
    /// quote pair if still present, parse.
    LastResort,
}

impl Strategy {
    /// Evaluation order used by [`decode`].
    pub const ORDER: [Strategy; 4] = [
        Strategy::Structured,
        Strategy::StrictText,
        Strategy::QuotedUnescape,
        Strategy::LastResort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Structured => "structured",
            Strategy::StrictText => "strict-text",
            Strategy::QuotedUnescape => "quoted-unescape",
            Strategy::LastResort => "last-resort",
        }
    }

    /// Run this strategy alone against `payload`.
    pub fn apply(self, payload: &RawAgentPayload) -> Result<Vec<Row>, DecodeError> {
        match self {
            Strategy::Structured => match payload {
                Value::Array(_) | Value::Object(_) => rows_from_value(payload.clone()),
                _ => Err(DecodeError::NotApplicable("payload is not structured")),
            },
            Strategy::StrictText => parse_rows(text_of(payload)?),
            Strategy::QuotedUnescape => {
                let text = text_of(payload)?;
                let inner = quoted_re()
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .ok_or(DecodeError::NotApplicable("text is not wrapped in quotes"))?;
                let unescaped = inner.as_str().replace('\\', "");
                parse_rows(&unescaped)
            }
            Strategy::LastResort => {
                let text = text_of(payload)?;
                let requoted = text.replace("\\\"", "\"");
                let cleaned = quoted_re().replace(&requoted, "$1");
                parse_rows(&cleaned)
            }
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Rows recovered from a payload, tagged with the strategy that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub rows: Vec<Row>,
    pub strategy: Strategy,
}

/// Try every [`Strategy`] in [`Strategy::ORDER`]; the first success wins.
pub fn decode(payload: &RawAgentPayload) -> Result<Decoded, DecodeError> {
    if !matches!(payload, Value::String(_) | Value::Array(_) | Value::Object(_)) {
        return Err(DecodeError::Unsupported {
            found: kind_of(payload),
        });
    }

    let mut attempts = Vec::new();
    for strategy in Strategy::ORDER {
        match strategy.apply(payload) {
            Ok(rows) => {
                tracing::debug!(%strategy, rows = rows.len(), "payload decoded");
                return Ok(Decoded { rows, strategy });
            }
            Err(DecodeError::NotApplicable(reason)) => {
                tracing::trace!(%strategy, reason, "decode strategy skipped");
            }
            Err(error) => {
                tracing::debug!(%strategy, %error, "decode strategy failed");
                attempts.push(Attempt { strategy, error });
            }
        }
    }

    Err(DecodeError::Exhausted { attempts })
}

/// Best-effort rows from an untrusted payload. Never fails: when nothing can
/// be recovered the result is empty.
pub fn normalize(payload: &RawAgentPayload) -> Vec<Row> {
    match decode(payload) {
        Ok(decoded) => decoded.rows,
        Err(error) => {
            tracing::warn!(%error, "no rows recovered from agent payload");
            Vec::new()
        }
    }
}

/// Convenience wrapper for raw reply text.
pub fn normalize_text(text: &str) -> Vec<Row> {
    normalize(&Value::String(text.to_string()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn text_of(payload: &RawAgentPayload) -> Result<&str, DecodeError> {
    payload
        .as_str()
        .ok_or(DecodeError::NotApplicable("payload is not text"))
}

fn parse_rows(text: &str) -> Result<Vec<Row>, DecodeError> {
    rows_from_value(serde_json::from_str(text)?)
}

/// Accept a single object or an array made only of objects.
fn rows_from_value(value: Value) -> Result<Vec<Row>, DecodeError> {
    match value {
        Value::Object(row) => Ok(vec![row]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                _ => Err(DecodeError::Shape {
                    found: "a sequence containing non-object items",
                }),
            })
            .collect(),
        other => Err(DecodeError::Shape {
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
