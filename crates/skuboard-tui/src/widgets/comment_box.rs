//! Comment box — single-line text input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `←` / `→` move the cursor.
//! - `Enter` submits (handled by the app shell).
//!
//! The bottom border carries the latest [`Notice`] (submit result, store
//! errors).

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::command_bar::edit_line;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A one-line message shown under the comment box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CommentBoxState {
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
    /// A submit is in flight.
    pub submitting: bool,
    pub notice: Option<Notice>,
}

impl CommentBoxState {
    pub fn handle(&mut self, event: &AppEvent) {
        if edit_line(&mut self.text, &mut self.cursor, event) {
            tracing::debug!(len = self.text.len(), cursor = self.cursor, "comment: edited");
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CommentBox<'a> {
    state: &'a CommentBoxState,
    /// What the comment is about, e.g. `00123` or `2 selected`.
    target: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CommentBox<'a> {
    pub fn new(state: &'a CommentBoxState, target: String, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            target,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.text[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for CommentBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.state.submitting {
            format!(" Comment on {} (submitting…) ", self.target)
        } else {
            format!(" Comment on {} ", self.target)
        };
        let mut block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        if let Some(notice) = &self.state.notice {
            let style = match notice.kind {
                NoticeKind::Info => self.theme.notice_info,
                NoticeKind::Error => self.theme.notice_error,
            };
            block = block.title_bottom(Line::from(Span::styled(format!(" {} ", notice.text), style)));
        }

        let line = if self.state.text.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press Enter on a row, or Tab here, to comment",
                self.theme.border_unfocused.add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.text.as_str())
        };
        Paragraph::new(line).block(block).render(area, buf);
    }
}
