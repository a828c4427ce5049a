//! Dashboard — the UI-agnostic model behind the SKU table, the comment box
//! and the time-window filter.
//!
//! Both screens (the live dashboard and the read-only view) use the same
//! [`Dashboard`] and differ only in their [`PanelOptions`].

use crate::decorate::decorate;
use crate::store::{KvStore, KvStoreExt, StoreError, DASHBOARD_DATA_KEY, SELECTED_ROW_KEY};
use crate::types::{row_id, Row, RowStatus, ID_FIELD, STATUS_FIELD};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What submitting a comment does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// Forward the comment to the notification agent.
    Notify,
    /// Acknowledge locally and reset the comment box.
    LocalOnly,
}

/// Per-screen switches for the shared dashboard component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOptions {
    pub show_filters: bool,
    pub on_submit: SubmitAction,
}

impl PanelOptions {
    /// The live dashboard: filters shown, comments notify.
    pub fn dashboard() -> Self {
        Self {
            show_filters: true,
            on_submit: SubmitAction::Notify,
        }
    }

    /// The view screen: no filters, comments stay local.
    pub fn view() -> Self {
        Self {
            show_filters: false,
            on_submit: SubmitAction::LocalOnly,
        }
    }
}

// ---------------------------------------------------------------------------
// Time window
// ---------------------------------------------------------------------------

/// Look-back period the agent ranks SKUs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::OneMonth,
        TimeWindow::ThreeMonths,
        TimeWindow::SixMonths,
        TimeWindow::TwelveMonths,
    ];

    pub fn months(self) -> u8 {
        match self {
            TimeWindow::OneMonth => 1,
            TimeWindow::ThreeMonths => 3,
            TimeWindow::SixMonths => 6,
            TimeWindow::TwelveMonths => 12,
        }
    }

    pub fn from_months(months: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.months() == months)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::OneMonth => "Last Month",
            TimeWindow::ThreeMonths => "Last 3 Months",
            TimeWindow::SixMonths => "Last 6 Months",
            TimeWindow::TwelveMonths => "Last 12 Months",
        }
    }

    /// Next longer window, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Next shorter window, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Selection + sort
// ---------------------------------------------------------------------------

/// Tri-state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub order: SortOrder,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<Row>,
    /// Ids of checked rows, in the order they were checked.
    selected: Vec<String>,
    /// Id of the row the comment box targets.
    focused: Option<String>,
    sort: Option<SortKey>,
    loaded_at: Option<DateTime<Utc>>,
    pub options: PanelOptions,
}

impl Dashboard {
    pub fn new(options: PanelOptions) -> Self {
        Self {
            rows: Vec::new(),
            selected: Vec::new(),
            focused: None,
            sort: None,
            loaded_at: None,
            options,
        }
    }

    /// Replace the data set. Selection and focus survive for ids that are
    /// still present; the active sort is reapplied.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.loaded_at = Some(Utc::now());
        let rows = &self.rows;
        self.selected.retain(|id| {
            find_row(rows, id).is_some_and(|r| RowStatus::of(r) == RowStatus::Active)
        });
        if let Some(id) = &self.focused {
            if find_row(&self.rows, id).is_none() {
                self.focused = None;
            }
        }
        self.apply_sort();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn row_by_id(&self, id: &str) -> Option<&Row> {
        find_row(&self.rows, id)
    }

    /// Union of keys across all rows in first-seen order, without the
    /// internal `id` and `status` fields.
    pub fn column_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if key != ID_FIELD && key != STATUS_FIELD && !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
        headers
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Rows that are currently checked, in table order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|r| row_id(r).is_some_and(|id| self.is_selected(&id)))
            .collect()
    }

    /// Toggle the checkbox of `id`. Discontinued rows cannot be checked.
    /// Returns whether the row is checked afterwards.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            return false;
        }
        let active = self
            .rows
            .iter()
            .any(|r| row_id(r).as_deref() == Some(id) && RowStatus::of(r) == RowStatus::Active);
        if active {
            self.selected.push(id.to_string());
        }
        active
    }

    /// Check every selectable row, or clear the selection.
    pub fn select_all(&mut self, checked: bool) {
        self.selected = if checked {
            self.selectable_ids()
        } else {
            Vec::new()
        };
    }

    pub fn selection_state(&self) -> SelectionState {
        let selectable = self.selectable_ids().len();
        match self.selected.len() {
            0 => SelectionState::None,
            n if n >= selectable => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }

    fn selectable_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| RowStatus::of(r) == RowStatus::Active)
            .filter_map(row_id)
            .fold(Vec::new(), |mut ids, id| {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                ids
            })
    }

    // ── Focus ──────────────────────────────────────────────────────────────

    /// Make `id` the row the comment box targets. Unknown ids are ignored.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.row_by_id(id).is_some() {
            self.focused = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn focused_row(&self) -> Option<&Row> {
        self.focused.as_deref().and_then(|id| self.row_by_id(id))
    }

    // ── Discontinue ────────────────────────────────────────────────────────

    /// Mark every row carrying `id` discontinued; an agent can repeat a sku,
    /// so ids are not unique. Returns `false` for unknown ids.
    pub fn discontinue(&mut self, id: &str) -> bool {
        let mut matched = 0usize;
        for row in self.rows.iter_mut().filter(|r| row_id(r).as_deref() == Some(id)) {
            row.insert(
                STATUS_FIELD.to_string(),
                Value::String(RowStatus::Discontinued.as_str().to_string()),
            );
            matched += 1;
        }
        if matched == 0 {
            return false;
        }
        self.selected.retain(|s| s != id);
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        tracing::debug!(id, rows = matched, "row discontinued");
        true
    }

    /// Discontinue every checked row and clear the selection. Returns how many
    /// rows changed.
    pub fn discontinue_selected(&mut self) -> usize {
        let ids = std::mem::take(&mut self.selected);
        ids.iter().filter(|id| self.discontinue(id)).count()
    }

    // ── Sort ───────────────────────────────────────────────────────────────

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Sort by `column`; choosing the active column again flips the order.
    pub fn sort_by(&mut self, column: &str) {
        let order = match &self.sort {
            Some(key) if key.column == column && key.order == SortOrder::Ascending => {
                SortOrder::Descending
            }
            _ => SortOrder::Ascending,
        };
        self.sort = Some(SortKey {
            column: column.to_string(),
            order,
        });
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let Some(key) = &self.sort else { return };
        let column = key.column.as_str();
        let order = key.order;
        self.rows
            .sort_by(|a, b| compare_cells(a.get(column), b.get(column), order));
    }

    // ── Persistence ────────────────────────────────────────────────────────

    /// Persist the data set and the focused row.
    pub fn save(&self, store: &dyn KvStore) -> Result<(), StoreError> {
        store.set_json(DASHBOARD_DATA_KEY, &self.rows)?;
        self.save_focus(store)
    }

    pub fn save_focus(&self, store: &dyn KvStore) -> Result<(), StoreError> {
        match self.focused_row() {
            Some(row) => store.set_json(SELECTED_ROW_KEY, row),
            None => store.remove(SELECTED_ROW_KEY),
        }
    }

    /// Restore a dashboard from `store`. Missing data yields an empty
    /// dashboard; stored rows are re-decorated in case they were edited by
    /// hand.
    pub fn load(store: &dyn KvStore, options: PanelOptions) -> Result<Self, StoreError> {
        let mut dashboard = Self::new(options);
        let rows: Vec<Row> = store.get_json(DASHBOARD_DATA_KEY)?.unwrap_or_default();
        dashboard.set_rows(decorate(rows));
        let focused: Option<Row> = store.get_json(SELECTED_ROW_KEY)?;
        if let Some(id) = focused.as_ref().and_then(row_id) {
            dashboard.focus(&id);
        }
        Ok(dashboard)
    }
}

fn find_row<'a>(rows: &'a [Row], id: &str) -> Option<&'a Row> {
    rows.iter().find(|r| row_id(r).as_deref() == Some(id))
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Text shown in a table cell: strings unquoted, other values rendered as
/// JSON, absent values empty.
pub fn cell_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Column header label: first letter capitalized, camelCase split into words
/// (`averageScore` → `Average Score`).
pub fn header_label(column: &str) -> String {
    let mut out = String::with_capacity(column.len() + 4);
    for (i, c) in column.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Numbers (and numeric strings) compare numerically, everything else as
/// text. Missing values sort last in either order.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ord = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => display(a).cmp(&display(b)),
        },
    };
    match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
