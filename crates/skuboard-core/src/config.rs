//! Configuration types for skuboard.
//!
//! [`Config::load`] reads `~/.config/skuboard/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then layers an optional
//! explicit file and `SKUBOARD_*` environment variables on top (for example
//! `SKUBOARD_AGENT__TOKEN`). [`Config::defaults`] returns the built-in
//! defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[agent]
url          = "https://agents.example.com/genai-agents/api/v1/ask"
token        = ""
user_id      = "skuboard"
sku_app      = "sku_rationalization_agent_1"
notify_app   = "sku_notification_agent_1"
timeout_secs = 60

[store]
dir = ""

[ui]
default_months = 1
show_filters   = true
theme          = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[agent]` section — where and how to reach the agent endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Static bearer token. Prefer `SKUBOARD_AGENT__TOKEN` over the file.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Agent app that ranks SKUs.
    #[serde(default = "default_sku_app")]
    pub sku_app: String,
    /// Agent app that sends the comment notification email.
    #[serde(default = "default_notify_app")]
    pub notify_app: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String { "https://agents.example.com/genai-agents/api/v1/ask".to_string() }
fn default_user_id() -> String { "skuboard".to_string() }
fn default_sku_app() -> String { "sku_rationalization_agent_1".to_string() }
fn default_notify_app() -> String { "sku_notification_agent_1".to_string() }
fn default_timeout_secs() -> u64 { 60 }

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
            user_id: default_user_id(),
            sku_app: default_sku_app(),
            notify_app: default_notify_app(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Directory shared by the dashboard and view screens. Empty means the
    /// platform data directory (see [`StoreConfig::resolved_dir`]).
    #[serde(default)]
    pub dir: String,
}

impl StoreConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            data_dir()
        } else {
            PathBuf::from(&self.dir)
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_months")]
    pub default_months: u8,
    #[serde(default = "default_show_filters")]
    pub show_filters: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_months() -> u8 { 1 }
fn default_show_filters() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_months: default_months(),
            show_filters: default_show_filters(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/skuboard/config.toml` layered on the built-in
    /// defaults, then `extra` (if given), then `SKUBOARD_*` environment
    /// variables. Creates the user file with defaults if it does not exist.
    pub fn load(extra: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false));
        if let Some(extra) = extra {
            builder = builder.add_source(config::File::from(extra).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix("SKUBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Parse a complete TOML document layered on the defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("skuboard")
        .join("config.toml")
}

fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join("skuboard")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.agent.sku_app, "sku_rationalization_agent_1");
        assert_eq!(cfg.agent.timeout_secs, 60);
        assert!(cfg.agent.token.is_empty());
        assert_eq!(cfg.ui.default_months, 1);
        assert!(cfg.ui.show_filters);
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [agent]
            url = "http://127.0.0.1:9000/ask"
            [store]
            dir = "/tmp/skuboard-test"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.agent.url, "http://127.0.0.1:9000/ask");
        assert_eq!(cfg.agent.notify_app, "sku_notification_agent_1");
        assert_eq!(cfg.store.resolved_dir(), PathBuf::from("/tmp/skuboard-test"));
    }
}
