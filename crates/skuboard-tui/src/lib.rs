//! skuboard TUI — ratatui application shell.
//!
//! Two screens share one component: the live **dashboard** (ranked SKUs
//! fetched from the agent, time-window filters, comments forwarded to the
//! notification agent) and the read-only **view** (rows loaded from the
//! shared store, reloaded when the store changes).

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use skuboard_core::config::Config;
use tokio::runtime::Handle;

/// Which screen to start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dashboard,
    View,
}

/// Run the TUI until the user quits. Network calls are spawned on `runtime`.
pub fn run(config: Config, mode: Mode, runtime: Handle) -> anyhow::Result<()> {
    App::new(config, mode, runtime)?.run()
}
