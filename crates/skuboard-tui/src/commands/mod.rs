// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use skuboard_core::TimeWindow;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the active tab; on the first tab, quit
    Quit,
    // Quit regardless of the active tab
    Exit,
    Help,
    // Switch the time window and refetch
    Months(TimeWindow),
    // Sort by a column, flipping the order if it is already the sort column
    Sort(String),
    Refresh,
    // Open (or switch to) the view tab
    View,
    Theme(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "refresh" => Ok(Command::Refresh),
            "view" => Ok(Command::View),
            "months" => rest
                .parse::<u8>()
                .ok()
                .and_then(TimeWindow::from_months)
                .map(Command::Months)
                .ok_or_else(|| "usage: months <1|3|6|12>".to_string()),
            "sort" => {
                if rest.is_empty() {
                    Err("usage: sort <column>".to_string())
                } else {
                    Ok(Command::Sort(rest.to_string()))
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state. Returns an
/// error message to show in the command bar when the command cannot apply.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.close_active_tab(),
        Command::Exit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Months(window) => {
            let tab = s.dashboard_tab().ok_or("no dashboard tab open")?;
            s.tabs[tab].window = window;
            s.active_tab = tab;
            s.begin_fetch();
        }
        Command::Sort(column) => {
            let tab = s.active_mut();
            let column = tab
                .dashboard
                .column_headers()
                .into_iter()
                .find(|c| c.eq_ignore_ascii_case(&column))
                .ok_or_else(|| format!("unknown column: {column}"))?;
            tab.dashboard.sort_by(&column);
        }
        Command::Refresh => {
            if s.dashboard_tab().is_none() {
                return Err("nothing to refresh in view mode".to_string());
            }
            s.begin_fetch();
        }
        Command::View => s.open_view(),
        Command::Theme(name) => s.theme = Theme::by_name(&name),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
