//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit / close tab"),
    ("Tab", "Cycle focus: filters → table → comment"),
    ("[  /  ]", "Previous / next tab"),
    ("↑ k  /  ↓ j", "Move the table cursor"),
    ("← h  /  → l", "Pick time window, Enter applies (filters)"),
    ("PageUp / PageDown", "Move one page"),
    ("Space", "Check / uncheck row"),
    ("a", "Check / uncheck all active rows"),
    ("Enter", "Comment on row · submit comment"),
    ("d", "Discontinue checked rows, else the cursor row"),
    ("s", "Sort by next column"),
    ("r", "Refresh from the agent"),
    ("Escape", "Leave the comment box"),
    (":", "Command (months, sort, view, theme…)"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" skuboard — keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        self.theme.table_header.add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
