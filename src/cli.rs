//! Command-line interface.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use skuboard_core::{decode, decorate, RawAgentPayload, Row, Strategy};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "skuboard", about = "Review underperforming SKUs ranked by an agent endpoint")]
pub struct Cli {
    /// Write debug logs to $TMPDIR/skuboard-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Extra config file layered over ~/.config/skuboard/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    /// Fetch ranked SKUs from the agent and review them (default).
    Dashboard,
    /// Show the rows saved by the last dashboard session.
    View,
    /// Run a raw agent payload through the normalizer and print the rows.
    Normalize {
        /// Payload file; stdin when omitted.
        file: Option<PathBuf>,
        /// The input is a full `{"text": ...}` reply envelope.
        #[arg(long)]
        envelope: bool,
    },
}

/// Rows recovered from a payload, and the strategy that recovered them.
#[derive(Debug)]
pub struct NormalizeOutput {
    pub rows: Vec<Row>,
    pub strategy: Option<Strategy>,
}

/// Parse `input` the way the agent reply would be seen: JSON when it parses,
/// otherwise the raw text as a string payload.
pub fn normalize_input(input: &str, envelope: bool) -> NormalizeOutput {
    let parsed: RawAgentPayload = serde_json::from_str(input.trim())
        .unwrap_or_else(|_| Value::String(input.trim_end_matches(['\r', '\n']).to_string()));
    let payload = if envelope {
        parsed.get("text").cloned().unwrap_or(Value::Null)
    } else {
        parsed
    };

    match decode(&payload) {
        Ok(decoded) => NormalizeOutput {
            rows: decorate(decoded.rows),
            strategy: Some(decoded.strategy),
        },
        Err(error) => {
            tracing::warn!(%error, "no rows recovered");
            NormalizeOutput {
                rows: Vec::new(),
                strategy: None,
            }
        }
    }
}

pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["skuboard", "--debug", "view"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.command, Some(CliCommand::View));

        let cli = Cli::try_parse_from(["skuboard"]).unwrap();
        assert_eq!(cli.command, None);

        let cli =
            Cli::try_parse_from(["skuboard", "normalize", "reply.json", "--envelope"]).unwrap();
        assert_eq!(
            cli.command,
            Some(CliCommand::Normalize {
                file: Some(PathBuf::from("reply.json")),
                envelope: true
            })
        );
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["skuboard", "dashboard", "--config", "/tmp/x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn plain_json_text_is_structured() {
        let out = normalize_input(r#"[{"sku":"123","name":"A"}]"#, false);
        assert_eq!(out.strategy, Some(Strategy::Structured));
        assert_eq!(out.rows[0]["id"], json!("123"));
    }

    #[test]
    fn raw_text_goes_through_text_tiers() {
        let out = normalize_input("not json at all\n", false);
        assert!(out.rows.is_empty());
        assert_eq!(out.strategy, None);
    }

    #[test]
    fn envelope_text_is_unwrapped() {
        let input = json!({"text": "\"[{\\\"sku\\\": \\\"9\\\"}]\""}).to_string();
        let out = normalize_input(&input, true);
        assert_eq!(out.strategy, Some(Strategy::QuotedUnescape));
        assert_eq!(out.rows.len(), 1);
    }
}
