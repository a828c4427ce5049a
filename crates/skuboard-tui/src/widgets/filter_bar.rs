//! Time-window filter bar shown above the table on the dashboard tab.
//!
//! `←` / `→` (or `h` / `l`) pick a shorter or longer window; `Enter` applies
//! it and refetches.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Block, Tabs, Widget},
};
use skuboard_core::TimeWindow;

/// Apply a navigation event to `window`. Returns the new window when it
/// changed.
pub fn handle(window: TimeWindow, event: &AppEvent) -> Option<TimeWindow> {
    let next = match event {
        AppEvent::Nav(Direction::Left) => window.prev(),
        AppEvent::Nav(Direction::Right) => window.next(),
        _ => return None,
    };
    tracing::debug!(months = next.months(), "filter: window changed");
    Some(next)
}

pub struct FilterBar<'a> {
    window: TimeWindow,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(window: TimeWindow, focused: bool, theme: &'a Theme) -> Self {
        Self {
            window,
            focused,
            theme,
        }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Time Window ")
            .title_bottom(Line::from(" ←/→ pick  Enter apply ").right_aligned())
            .border_style(self.theme.border(self.focused));

        let labels: Vec<Line> = TimeWindow::ALL.iter().map(|w| Line::from(w.label())).collect();
        let selected = TimeWindow::ALL
            .iter()
            .position(|w| *w == self.window)
            .unwrap_or(0);

        Tabs::new(labels)
            .select(selected)
            .highlight_style(self.theme.table_cursor.add_modifier(Modifier::BOLD))
            .divider(" | ")
            .block(block)
            .render(area, buf);
    }
}
