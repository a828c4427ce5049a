//! Tab bar widget: the one-line strip at the top of the screen.
//!
//! Left side lists the open tabs (`1:dashboard`, `2:view`); busy tabs carry a
//! `●`. Right side shows how many rows are checked on the active tab and the
//! two keys everyone needs.

use crate::app::TabState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

pub struct TabBar<'a> {
    tabs: &'a [TabState],
    active: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabState], active: usize, theme: &'a Theme) -> Self {
        Self { tabs, active, theme }
    }

    fn status_text(&self) -> String {
        let checked = self
            .tabs
            .get(self.active)
            .map_or(0, |t| t.dashboard.selected_ids().len());
        match checked {
            0 => " q:quit  ?:help ".to_string(),
            n => format!(" {n} checked │ q:quit  ?:help "),
        }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.tabs.len());
        for (i, tab) in self.tabs.iter().enumerate() {
            let marker = if tab.is_busy() { " ●" } else { "" };
            let text = format!(" {}{} ", tab.label, marker);
            let style = if i == self.active {
                self.theme.table_cursor.add_modifier(Modifier::BOLD)
            } else {
                self.theme.border_unfocused
            };
            spans.push(Span::styled(text, style));
        }
        Line::from(spans).render(area, buf);

        let status = self.status_text();
        let width = status.chars().count() as u16;
        buf.set_string(
            area.right().saturating_sub(width),
            area.y,
            status,
            self.theme.border_unfocused.add_modifier(Modifier::DIM),
        );
    }
}
