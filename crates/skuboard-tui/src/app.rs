//! Top-level application state and the main event loop.
//!
//! [`AppState`] is a synchronous state machine: key events and
//! [`AppMessage`]s go in, [`Effect`]s come out. [`App`] owns the terminal,
//! the agent client and the store watcher, and turns effects into tokio
//! tasks whose results come back over a channel.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        comment_box::{CommentBox, CommentBoxState, Notice},
        filter_bar::{self, FilterBar},
        help::HelpPopup,
        sku_table::{LoadState, SkuTable, SkuTableState},
        tab_bar::TabBar,
    },
    Mode,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use skuboard_agent::{AgentClient, AgentError, SkuAgent, SUBMIT_ACK};
use skuboard_core::{
    config::Config,
    dashboard::{cell_text, SelectionState, SortOrder},
    types::{row_id, SKU_FIELD},
    Dashboard, FileStore, KvStore, PanelOptions, Row, SubmitAction, TimeWindow,
};
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

// ---------------------------------------------------------------------------
// Focus, tabs, effects, messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Table,
    Comment,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    /// Live data from the agent.
    Dashboard,
    /// Read-only copy loaded from the store.
    View,
}

pub struct TabState {
    pub label: String,
    pub kind: TabKind,
    pub dashboard: Dashboard,
    pub table: SkuTableState,
    pub comment: CommentBoxState,
    pub window: TimeWindow,
    pub load: LoadState,
}

impl TabState {
    pub(crate) fn new(
        label: String,
        kind: TabKind,
        dashboard: Dashboard,
        window: TimeWindow,
    ) -> Self {
        Self {
            label,
            kind,
            dashboard,
            table: SkuTableState::default(),
            comment: CommentBoxState::default(),
            window,
            load: LoadState::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.load == LoadState::Loading || self.comment.submitting
    }
}

/// Work the state machine hands to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { generation: u64, window: TimeWindow },
    Submit { rows: Vec<Row>, comment: String },
    /// Start watching the store directory for view reloads.
    WatchStore,
}

/// Results posted back to the event loop by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    Fetched {
        generation: u64,
        result: Result<Vec<Row>, String>,
    },
    Submitted(Result<String, String>),
    StoreChanged,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    store: Arc<dyn KvStore>,
    /// Bumped on every fetch; replies tagged with an older value are stale.
    fetch_generation: u64,
    pending: Vec<Effect>,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, store: Arc<dyn KvStore>, mode: Mode) -> Self {
        let mut state = AppState {
            tabs: Vec::new(),
            active_tab: 0,
            focus: Focus::Table,
            prev_focus: Focus::Table,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            store,
            fetch_generation: 0,
            pending: Vec::new(),
        };

        match mode {
            Mode::Dashboard => {
                let options = PanelOptions {
                    show_filters: state.config.ui.show_filters,
                    on_submit: SubmitAction::Notify,
                };
                let window = TimeWindow::from_months(state.config.ui.default_months)
                    .unwrap_or_default();
                state.tabs.push(TabState::new(
                    "1:dashboard".to_string(),
                    TabKind::Dashboard,
                    Dashboard::new(options),
                    window,
                ));
                state.focus = if options.show_filters {
                    Focus::Filters
                } else {
                    Focus::Table
                };
                state.begin_fetch();
            }
            Mode::View => state.open_view(),
        }
        state
    }

    pub fn active(&self) -> &TabState {
        &self.tabs[self.active_tab]
    }

    pub fn active_mut(&mut self) -> &mut TabState {
        &mut self.tabs[self.active_tab]
    }

    pub fn dashboard_tab(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.kind == TabKind::Dashboard)
    }

    pub fn view_tab(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.kind == TabKind::View)
    }

    /// Drain the effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    /// Start a fetch for the dashboard tab's current window. Any fetch still
    /// in flight becomes stale.
    pub fn begin_fetch(&mut self) {
        let Some(i) = self.dashboard_tab() else { return };
        self.fetch_generation += 1;
        let tab = &mut self.tabs[i];
        tab.load = LoadState::Loading;
        tracing::debug!(
            generation = self.fetch_generation,
            months = tab.window.months(),
            "fetch started"
        );
        self.pending.push(Effect::Fetch {
            generation: self.fetch_generation,
            window: tab.window,
        });
    }

    /// Switch to the view tab, opening it from the store if needed.
    pub fn open_view(&mut self) {
        if let Some(i) = self.view_tab() {
            self.active_tab = i;
        } else {
            let dashboard = match Dashboard::load(&*self.store, PanelOptions::view()) {
                Ok(d) => d,
                Err(error) => {
                    tracing::warn!(%error, "could not load stored rows");
                    let mut tab = TabState::new(
                        String::new(),
                        TabKind::View,
                        Dashboard::new(PanelOptions::view()),
                        TimeWindow::default(),
                    );
                    tab.load = LoadState::Failed(error.to_string());
                    self.push_view(tab);
                    return;
                }
            };
            self.push_view(TabState::new(
                String::new(),
                TabKind::View,
                dashboard,
                TimeWindow::default(),
            ));
        }
        self.fix_focus();
    }

    fn push_view(&mut self, mut tab: TabState) {
        tab.label = format!("{}:view", self.tabs.len() + 1);
        tracing::debug!(label = %tab.label, rows = tab.dashboard.len(), "view tab opened");
        self.tabs.push(tab);
        self.active_tab = self.tabs.len() - 1;
        self.pending.push(Effect::WatchStore);
        self.fix_focus();
    }

    /// Close the active tab; closing the first tab quits.
    pub fn close_active_tab(&mut self) {
        if self.active_tab == 0 {
            tracing::debug!("quit");
            self.quit = true;
        } else {
            tracing::debug!(tab = self.active_tab, "closing tab");
            self.tabs.remove(self.active_tab);
            self.active_tab = self.active_tab.saturating_sub(1);
            self.fix_focus();
        }
    }

    /// Filters only exist on tabs that show them.
    fn fix_focus(&mut self) {
        if self.focus == Focus::Filters && !self.active().dashboard.options.show_filters {
            self.focus = Focus::Table;
        }
    }

    // ── Background results ─────────────────────────────────────────────────

    pub fn apply(&mut self, message: AppMessage) {
        match message {
            AppMessage::Fetched { generation, result } => {
                if generation != self.fetch_generation {
                    tracing::debug!(
                        generation,
                        current = self.fetch_generation,
                        "stale fetch discarded"
                    );
                    return;
                }
                let Some(i) = self.dashboard_tab() else { return };
                let tab = &mut self.tabs[i];
                match result {
                    Ok(rows) => {
                        tab.dashboard.set_rows(rows);
                        tab.table.clamp(tab.dashboard.len());
                        tab.load = LoadState::Idle;
                        save(&*self.store, tab);
                    }
                    Err(msg) => {
                        tracing::warn!(error = %msg, "fetch failed");
                        tab.load = LoadState::Failed(msg);
                    }
                }
            }
            AppMessage::Submitted(result) => {
                let Some(i) = self.dashboard_tab() else { return };
                let tab = &mut self.tabs[i];
                tab.comment.submitting = false;
                match result {
                    Ok(ack) => {
                        tab.comment.clear();
                        tab.comment.notice = Some(Notice::info(ack));
                        save(&*self.store, tab);
                        self.open_view();
                    }
                    Err(msg) => {
                        tracing::warn!(error = %msg, "submit failed");
                        tab.comment.notice = Some(Notice::error(msg));
                    }
                }
            }
            AppMessage::StoreChanged => self.reload_views(),
        }
    }

    /// Refresh every view tab from the store, keeping selection and sort.
    pub fn reload_views(&mut self) {
        for tab in self.tabs.iter_mut().filter(|t| t.kind == TabKind::View) {
            match Dashboard::load(&*self.store, tab.dashboard.options) {
                Ok(fresh) => {
                    tab.dashboard.set_rows(fresh.rows().to_vec());
                    match fresh.focused_row().and_then(row_id) {
                        Some(id) => {
                            tab.dashboard.focus(&id);
                        }
                        None => tab.dashboard.clear_focus(),
                    }
                    tab.table.clamp(tab.dashboard.len());
                    tab.load = LoadState::Idle;
                    tracing::debug!(rows = tab.dashboard.len(), "view reloaded from store");
                }
                Err(error) => {
                    tracing::warn!(%error, "view reload failed");
                    tab.comment.notice = Some(Notice::error(error.to_string()));
                }
            }
        }
    }

    // ── Key events ─────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        if self.focus == Focus::Comment {
            self.handle_comment(event);
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => self.close_active_tab(),
            AppEvent::FocusNext => self.focus_next(),
            AppEvent::NextTab | AppEvent::PrevTab => {
                let n = self.tabs.len();
                self.active_tab = if event == AppEvent::NextTab {
                    (self.active_tab + 1) % n
                } else {
                    (self.active_tab + n - 1) % n
                };
                tracing::debug!(tab = self.active_tab, "tab switched");
                self.fix_focus();
            }
            AppEvent::Refresh => match self.active().kind {
                TabKind::Dashboard => self.begin_fetch(),
                TabKind::View => self.reload_views(),
            },
            AppEvent::ToggleSelect => {
                let tab = self.active_mut();
                if let Some(id) = tab.table.cursor_id(&tab.dashboard) {
                    let checked = tab.dashboard.toggle_selected(&id);
                    tracing::debug!(id = %id, checked, "row toggled");
                }
            }
            AppEvent::SelectAll => {
                let d = &mut self.active_mut().dashboard;
                let all = d.selection_state() == SelectionState::All;
                d.select_all(!all);
            }
            AppEvent::Discontinue => {
                let store = Arc::clone(&self.store);
                let tab = self.active_mut();
                if tab.dashboard.discontinue_selected() == 0 {
                    if let Some(id) = tab.table.cursor_id(&tab.dashboard) {
                        tab.dashboard.discontinue(&id);
                    }
                }
                save(&*store, tab);
            }
            AppEvent::SortNext => sort_next(&mut self.active_mut().dashboard),
            AppEvent::Resize(_, _) => {}
            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        if let Err(msg) = execute_command(self, cmd) {
                            self.prev_focus = self.focus;
                            self.focus = Focus::Command;
                            self.command_bar.error = Some(msg);
                        }
                        self.fix_focus();
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => self.command_bar.error = Some(msg),
                }
            }
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_comment(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("focus: Comment -> Table");
                self.focus = Focus::Table;
            }
            AppEvent::FocusNext => self.focus_next(),
            AppEvent::Enter => self.submit_comment(),
            AppEvent::Quit => self.quit = true,
            other => self.active_mut().comment.handle(&other),
        }
    }

    fn focus_next(&mut self) {
        let filters = self.active().dashboard.options.show_filters;
        let next = match self.focus {
            Focus::Filters => Focus::Table,
            Focus::Table => Focus::Comment,
            Focus::Comment | Focus::Command if filters => Focus::Filters,
            Focus::Comment | Focus::Command => Focus::Table,
        };
        tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
        self.focus = next;
    }

    /// Route an event to the pane that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Filters => match event {
                AppEvent::Enter => self.begin_fetch(),
                other => {
                    let tab = self.active_mut();
                    if let Some(window) = filter_bar::handle(tab.window, &other) {
                        tab.window = window;
                    }
                }
            },
            Focus::Table => match event {
                AppEvent::Enter => self.focus_cursor_row(),
                other => {
                    let tab = self.active_mut();
                    let len = tab.dashboard.len();
                    tab.table.handle(&other, len);
                }
            },
            // handled before dispatch
            Focus::Comment | Focus::Command => {}
        }
    }

    /// Make the row under the cursor the comment target.
    fn focus_cursor_row(&mut self) {
        let store = Arc::clone(&self.store);
        let tab = self.active_mut();
        let Some(id) = tab.table.cursor_id(&tab.dashboard) else { return };
        let previous = tab.dashboard.focused_row().and_then(row_id);
        if previous.as_deref() != Some(id.as_str()) {
            // a draft belongs to the row it was written for
            tab.comment.clear();
            tab.comment.notice = None;
        }
        tab.dashboard.focus(&id);
        if let Err(error) = tab.dashboard.save_focus(&*store) {
            tracing::warn!(%error, "could not persist focused row");
            tab.comment.notice = Some(Notice::error(error.to_string()));
        }
        tracing::debug!(id = %id, "row focused for comment");
        self.focus = Focus::Comment;
    }

    fn submit_comment(&mut self) {
        let tab = &mut self.tabs[self.active_tab];
        if tab.comment.submitting {
            return;
        }
        if tab.comment.is_blank() {
            tab.comment.notice = Some(Notice::error(AgentError::EmptyComment.to_string()));
            return;
        }
        match tab.dashboard.options.on_submit {
            SubmitAction::Notify => {
                let rows = comment_rows(&tab.dashboard);
                tracing::debug!(rows = rows.len(), "submitting comment");
                tab.comment.submitting = true;
                tab.comment.notice = None;
                self.pending.push(Effect::Submit {
                    rows,
                    comment: tab.comment.text.trim().to_string(),
                });
            }
            SubmitAction::LocalOnly => {
                tab.comment.clear();
                tab.comment.notice = Some(Notice::info(SUBMIT_ACK));
            }
        }
    }
}

/// Persist a tab's rows; failures become a notice on the tab.
fn save(store: &dyn KvStore, tab: &mut TabState) {
    if let Err(error) = tab.dashboard.save(store) {
        tracing::warn!(%error, "could not persist rows");
        tab.comment.notice = Some(Notice::error(format!("could not save data: {error}")));
    }
}

/// Rows a comment is about: the checked rows, else the focused row.
fn comment_rows(dashboard: &Dashboard) -> Vec<Row> {
    let selected: Vec<Row> = dashboard.selected_rows().into_iter().cloned().collect();
    if !selected.is_empty() {
        return selected;
    }
    dashboard.focused_row().cloned().into_iter().collect()
}

/// Label for the comment box title.
fn comment_target(dashboard: &Dashboard) -> String {
    match dashboard.selected_ids().len() {
        0 => match dashboard.focused_row() {
            Some(row) => {
                let sku = cell_text(row, SKU_FIELD);
                if sku.is_empty() {
                    row_id(row).unwrap_or_default()
                } else {
                    sku
                }
            }
            None => "all SKUs".to_string(),
        },
        n => format!("{n} selected"),
    }
}

/// Ascending on a column, then descending, then the next column.
fn sort_next(dashboard: &mut Dashboard) {
    let columns = dashboard.column_headers();
    if columns.is_empty() {
        return;
    }
    let next = match dashboard.sort() {
        None => columns[0].clone(),
        Some(key) if key.order == SortOrder::Ascending => key.column.clone(),
        Some(key) => {
            let i = columns
                .iter()
                .position(|c| *c == key.column)
                .map_or(0, |i| (i + 1) % columns.len());
            columns[i].clone()
        }
    };
    dashboard.sort_by(&next);
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    runtime: Handle,
    agent: Arc<SkuAgent<AgentClient>>,
    store_dir: PathBuf,
    tx: UnboundedSender<AppMessage>,
    rx: UnboundedReceiver<AppMessage>,
    watcher: Option<RecommendedWatcher>,
}

impl App {
    pub fn new(config: Config, mode: Mode, runtime: Handle) -> anyhow::Result<Self> {
        let store = FileStore::open(config.store.resolved_dir())?;
        let store_dir = store.dir().to_path_buf();
        let agent = Arc::new(SkuAgent::from_config(&config.agent)?);
        let theme = Theme::by_name(&config.ui.theme);
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::info!(store = %store_dir.display(), ?mode, "starting TUI");

        Ok(App {
            state: AppState::new(config, theme, Arc::new(store), mode),
            runtime,
            agent,
            store_dir,
            tx,
            rx,
            watcher: None,
        })
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            while let Ok(message) = self.rx.try_recv() {
                self.state.apply(message);
            }
            self.run_effects();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn run_effects(&mut self) {
        for effect in self.state.take_effects() {
            match effect {
                Effect::Fetch { generation, window } => {
                    let agent = Arc::clone(&self.agent);
                    let tx = self.tx.clone();
                    self.runtime.spawn(async move {
                        let result = agent
                            .fetch_ranked_skus(window)
                            .await
                            .map_err(|e| e.to_string());
                        let _ = tx.send(AppMessage::Fetched { generation, result });
                    });
                }
                Effect::Submit { rows, comment } => {
                    let agent = Arc::clone(&self.agent);
                    let tx = self.tx.clone();
                    self.runtime.spawn(async move {
                        let refs: Vec<&Row> = rows.iter().collect();
                        let result = agent
                            .submit_comment(&refs, &comment)
                            .await
                            .map_err(|e| e.to_string());
                        let _ = tx.send(AppMessage::Submitted(result));
                    });
                }
                Effect::WatchStore => {
                    if self.watcher.is_some() {
                        continue;
                    }
                    match watch_store(&self.store_dir, self.tx.clone()) {
                        Ok(watcher) => self.watcher = Some(watcher),
                        Err(error) => {
                            tracing::warn!(%error, "store watcher unavailable; press r to reload");
                        }
                    }
                }
            }
        }
    }
}

/// Watch `dir` and post [`AppMessage::StoreChanged`] whenever a stored key
/// is written.
fn watch_store(
    dir: &Path,
    tx: UnboundedSender<AppMessage>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) if is_store_write(&event) => {
                let _ = tx.send(AppMessage::StoreChanged);
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(%error, "store watcher error"),
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    tracing::debug!(dir = %dir.display(), "watching store");
    Ok(watcher)
}

fn is_store_write(event: &notify::Event) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.extension().is_some_and(|ext| ext == "json"))
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Comment | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let tab = state.active();
    let filters = tab.dashboard.options.show_filters;

    // Vertical: 1-line tab bar | filters | table | 3-line comment box
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if filters { 3 } else { 0 }),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, &state.theme), vert[0]);
    if filters {
        frame.render_widget(
            FilterBar::new(tab.window, state.focus == Focus::Filters, &state.theme),
            vert[1],
        );
    }
    frame.render_widget(
        SkuTable::new(
            &tab.dashboard,
            &tab.table,
            &tab.load,
            state.focus == Focus::Table,
            &state.theme,
        ),
        vert[2],
    );
    let comment = CommentBox::new(
        &tab.comment,
        comment_target(&tab.dashboard),
        state.focus == Focus::Comment,
        &state.theme,
    );
    let cursor = comment.cursor_position(vert[3]);
    frame.render_widget(comment, vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Comment {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
