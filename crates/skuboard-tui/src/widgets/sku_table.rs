//! SKU table — the selectable, sortable grid in the middle of the screen.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//!
//! Selection, sorting and discontinuing are applied to the
//! [`Dashboard`] by the app shell; this module only tracks the cursor.

use std::cell::Cell;

use chrono::Local;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Cell as TableCell, Paragraph, Row as TableRow, StatefulWidget, Table, TableState,
        Widget, Wrap,
    },
};
use skuboard_core::dashboard::{cell_text, header_label, SelectionState, SortOrder};
use skuboard_core::types::row_id;
use skuboard_core::{Dashboard, RowStatus};

const DEFAULT_PAGE: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the last fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug)]
pub struct SkuTableState {
    /// Index into the dashboard's rows of the highlighted row.
    pub cursor: usize,
    /// Visible rows at the last render, used for page steps.
    page: Cell<usize>,
}

impl Default for SkuTableState {
    fn default() -> Self {
        Self {
            cursor: 0,
            page: Cell::new(DEFAULT_PAGE),
        }
    }
}

impl SkuTableState {
    /// Move the cursor. `len` is the current number of rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let page = self.page.get().max(1);
        self.cursor = match event {
            AppEvent::Nav(Direction::Up) => self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.cursor + 1).min(len - 1),
            AppEvent::ScrollUp => self.cursor.saturating_sub(page),
            AppEvent::ScrollDown => (self.cursor + page).min(len - 1),
            _ => return,
        };
        tracing::debug!(cursor = self.cursor, "table: cursor moved");
    }

    /// Keep the cursor inside a table of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Id of the row under the cursor.
    pub fn cursor_id(&self, dashboard: &Dashboard) -> Option<String> {
        dashboard.rows().get(self.cursor).and_then(row_id)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SkuTable<'a> {
    dashboard: &'a Dashboard,
    state: &'a SkuTableState,
    load: &'a LoadState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SkuTable<'a> {
    pub fn new(
        dashboard: &'a Dashboard,
        state: &'a SkuTableState,
        load: &'a LoadState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            dashboard,
            state,
            load,
            focused,
            theme,
        }
    }

    fn title(&self) -> String {
        let mut title = format!(" SKUs ({}) ", self.dashboard.len());
        if let Some(sort) = self.dashboard.sort() {
            let arrow = match sort.order {
                SortOrder::Ascending => "▲",
                SortOrder::Descending => "▼",
            };
            title.push_str(&format!("sorted by {} {arrow} ", header_label(&sort.column)));
        }
        if *self.load == LoadState::Loading {
            title.push_str("loading… ");
        } else if let Some(at) = self.dashboard.loaded_at() {
            title.push_str(&format!("updated {} ", at.with_timezone(&Local).format("%H:%M:%S")));
        }
        title
    }
}

impl Widget for SkuTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title())
            .border_style(self.theme.border(self.focused));

        // Error and empty placeholders replace the grid.
        if let LoadState::Failed(msg) = self.load {
            Paragraph::new(vec![
                Line::from(Span::styled("Failed to load SKUs", self.theme.notice_error)),
                Line::from(msg.as_str()),
                Line::from(Span::styled("press r to retry", self.theme.border_unfocused)),
            ])
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
            return;
        }
        if self.dashboard.is_empty() {
            let text = if *self.load == LoadState::Loading {
                "Loading…"
            } else {
                "No data available"
            };
            Paragraph::new(Line::from(Span::styled(text, self.theme.border_unfocused)))
                .block(block)
                .render(area, buf);
            return;
        }

        let columns = self.dashboard.column_headers();
        let check_all = match self.dashboard.selection_state() {
            SelectionState::None => "[ ]",
            SelectionState::Partial => "[-]",
            SelectionState::All => "[x]",
        };

        let mut header_cells = vec![TableCell::from(check_all)];
        header_cells.extend(columns.iter().map(|c| TableCell::from(header_label(c))));
        header_cells.push(TableCell::from("Status"));
        let header = TableRow::new(header_cells).style(self.theme.table_header);

        let rows: Vec<TableRow> = self
            .dashboard
            .rows()
            .iter()
            .map(|row| {
                let status = RowStatus::of(row);
                let checked = row_id(row).is_some_and(|id| self.dashboard.is_selected(&id));
                let mut cells = vec![TableCell::from(if checked { "[x]" } else { "[ ]" })];
                cells.extend(columns.iter().map(|c| TableCell::from(cell_text(row, c))));
                cells.push(TableCell::from(Span::styled(
                    status.as_str(),
                    self.theme.status_style(status),
                )));

                let mut style = self.theme.status_style(status);
                if status == RowStatus::Active {
                    style = if checked {
                        self.theme.table_selected
                    } else {
                        Style::default()
                    };
                }
                TableRow::new(cells).style(style)
            })
            .collect();

        let mut widths = vec![Constraint::Length(3)];
        widths.extend(columns.iter().map(|_| Constraint::Fill(1)));
        widths.push(Constraint::Length(12));

        let highlight = if self.focused {
            self.theme.table_cursor
        } else {
            self.theme.table_cursor.remove_modifier(Modifier::BOLD)
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(highlight);

        // Header row plus two borders.
        self.state.page.set((area.height as usize).saturating_sub(3).max(1));

        let mut table_state = TableState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
