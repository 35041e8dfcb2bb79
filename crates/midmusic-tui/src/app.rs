//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks:
//!   terminal input, fetch cycles, the player actor, reachability, library jobs.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use midmusic_core::catalog::CatalogClient;
use midmusic_core::config::Config;
use midmusic_core::error::LibraryError;
use midmusic_core::haptics::{HapticKind, Haptics};
use midmusic_core::home::{run_fetch_cycle, FeedEvent, FetchTrigger, HomeState};
use midmusic_core::library::{LibraryData, LibraryStore};
use midmusic_core::network::Reachability;
use midmusic_core::playback::PlaybackContext;

use crate::{
    action::{Action, ComponentId, Route},
    app_state::{AppState, LibrarySummary},
    component::Component,
    components::{
        downloads::{scan_downloads, Downloads},
        header::Header,
        help_overlay::HelpOverlay,
        loading,
        offline::{self, OFFLINE_TITLE},
        quick_picks::QuickPicks,
        settings::Settings,
        song_menu::SongMenu,
        trending::Trending,
    },
    focus::FocusRing,
    mpv::MpvEvent,
    player::{spawn_player, PlayerCommand, PlayerUpdate},
    theme::C_BG,
    widgets::{
        scroll_view,
        status_bar,
        toast::{Severity, ToastManager},
    },
};

pub const EXPORT_OK: &str = "Library data has been exported.";
pub const EXPORT_FAILED: &str = "An error occurred while exporting your library data.";
pub const IMPORT_OK: &str = "Library data imported successfully.";
pub const IMPORT_FAILED: &str = "An error occurred while importing library data.";

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    Feed(FeedEvent),
    Player(PlayerUpdate),
    Reachability(Reachability),
    LibraryExported(Result<PathBuf, LibraryError>),
    LibraryImported(Result<LibraryData, LibraryError>),
}

impl From<FeedEvent> for AppMessage {
    fn from(event: FeedEvent) -> Self {
        Self::Feed(event)
    }
}

impl From<PlayerUpdate> for AppMessage {
    fn from(update: PlayerUpdate) -> Self {
        Self::Player(update)
    }
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn layout rects, used by `handle_mouse` for hit-testing.
///
/// Home sections are kept in content space (origin at the top of the
/// scrollable feed); `home_body` is the viewport they scroll through.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    home_body: Rect,
    content_height: u16,
    quick_picks: Rect,
    trending: Rect,
    screen: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    quick_picks: QuickPicks,
    trending: Trending,
    downloads: Downloads,
    settings: Settings,
    song_menu: SongMenu,
    help_overlay: HelpOverlay,

    // ── Navigation ────────────────────────────────────────────────────────────
    focus: FocusRing,
    history: Vec<Route>,

    // ── Collaborators ─────────────────────────────────────────────────────────
    catalog: Arc<dyn CatalogClient>,
    player: mpsc::Sender<PlayerCommand>,
    library: Arc<LibraryStore>,
    haptics: Box<dyn Haptics>,
    reachability: watch::Receiver<Reachability>,

    // ── Event bus ─────────────────────────────────────────────────────────────
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,

    should_quit: bool,
    pane_areas: PaneAreas,
    toast: ToastManager,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &Config,
        catalog: Arc<dyn CatalogClient>,
        playback: PlaybackContext,
        engine_events: mpsc::Receiver<MpvEvent>,
        reachability: watch::Receiver<Reachability>,
        library: LibraryStore,
        haptics: Box<dyn Haptics>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let player = spawn_player(playback, engine_events, tx.clone());

        let mut state = AppState::new(
            config.paths.downloads_dir.clone(),
            config.paths.export_dir.clone(),
            config.paths.import_file.clone(),
        );
        state.show_keys_bar = config.ui.show_keys_bar;
        state.home.set_reachability(*reachability.borrow());

        Self {
            state,
            header: Header::new(),
            quick_picks: QuickPicks::new(),
            trending: Trending::new(),
            downloads: Downloads::new(),
            settings: Settings::new(),
            song_menu: SongMenu::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::default(),
            history: Vec::new(),
            catalog,
            player,
            library: Arc::new(library),
            haptics,
            reachability,
            tx,
            rx: Some(rx),
            should_quit: false,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already running"))?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: reachability changes ─────────────────────────────
        let net_tx = self.tx.clone();
        let mut net_rx = self.reachability.clone();
        tokio::spawn(async move {
            while net_rx.changed().await.is_ok() {
                let now = *net_rx.borrow_and_update();
                if net_tx.send(AppMessage::Reachability(now)).await.is_err() {
                    break;
                }
            }
        });

        // ── Mount ─────────────────────────────────────────────────────────────
        self.state.downloads = scan_downloads(&self.state.downloads_dir);
        self.start_fetch(FetchTrigger::Mount);

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut downloads_refresh = tokio::time::interval(Duration::from_secs(5));
        downloads_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Toast expiry + spinner/pulse animation.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = downloads_refresh.tick() => {
                    let files = scan_downloads(&self.state.downloads_dir);
                    if files != self.state.downloads {
                        self.state.downloads = files;
                        self.downloads.sync(&self.state);
                        needs_redraw = true;
                    }
                }

                _ = ui_tick.tick() => {
                    self.toast.tick();
                    self.state.frame = self.state.frame.wrapping_add(1);
                    needs_redraw = true;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Messages ──────────────────────────────────────────────────────────────

    /// Returns whether a redraw is needed.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                if actions.is_empty() && !matches!(mouse.kind, MouseEventKind::Down(_)) {
                    return false;
                }
                for action in actions {
                    self.dispatch(action).await;
                }
            }
            AppMessage::Event(Event::Resize(..)) => {}
            AppMessage::Event(_) => return false,

            AppMessage::Feed(event) => {
                if let Some(alert) = self.state.home.apply(event) {
                    // Prefixed so the two sections' alerts do not collapse into one toast.
                    self.toast
                        .error(format!("{} · {}", alert.kind.heading(), alert.message));
                    debug!("fetch alert detail: {}", alert.detail);
                }
                self.quick_picks.sync(&self.state);
                self.trending.sync(&self.state);
                self.sync_focus();
            }

            AppMessage::Player(update) => match update {
                PlayerUpdate::Started(song) => {
                    self.state.now_playing = Some(song);
                    self.state.paused = false;
                }
                PlayerUpdate::Paused(paused) => self.state.paused = paused,
                PlayerUpdate::Stopped => {
                    self.state.now_playing = None;
                    self.state.paused = false;
                }
                PlayerUpdate::Failed(e) => self.toast.error(format!("Playback failed: {}", e)),
            },

            AppMessage::Reachability(now) => {
                let before = self.state.home.reachability();
                if !self.state.home.set_reachability(now) {
                    return false;
                }
                match now {
                    Reachability::Unreachable => self.toast.warning(OFFLINE_TITLE),
                    Reachability::Reachable => {
                        // Only a return from offline counts; a first probe result does not.
                        if before.is_unreachable() {
                            self.toast.push("Back online", Severity::Info);
                            let home = &self.state.home;
                            if home.quick_picks().is_empty() && home.trending().is_empty() {
                                self.start_fetch(FetchTrigger::Refresh);
                            }
                        }
                    }
                    Reachability::Unknown => {}
                }
            }

            AppMessage::LibraryExported(result) => match result {
                Ok(path) => {
                    info!("library exported to {}", path.display());
                    self.toast.resolve_spinner(Severity::Success, EXPORT_OK);
                }
                Err(e) => {
                    error!("library export failed: {}", e);
                    self.toast.resolve_spinner(Severity::Error, EXPORT_FAILED);
                }
            },
            AppMessage::LibraryImported(result) => match result {
                Ok(data) => {
                    self.state.library = Some(summarize(&data));
                    self.toast.resolve_spinner(Severity::Success, IMPORT_OK);
                }
                Err(e) => {
                    error!("library import failed: {}", e);
                    self.toast.resolve_spinner(Severity::Error, IMPORT_FAILED);
                }
            },
        }
        true
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Global keys, whatever is open.
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                if !self.help_overlay.visible {
                    return vec![Action::Quit];
                }
            }
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            _ => {}
        }

        // Help overlay captures all keys when visible; anything else closes it.
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            return vec![Action::ToggleHelp];
        }

        if self.song_menu.is_open() {
            return self.song_menu.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char(' ') => return vec![Action::TogglePause],
            KeyCode::Char('x') => return vec![Action::Stop],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('d') => return vec![Action::Navigate(Route::Downloads)],
            KeyCode::Char(',') => return vec![Action::Navigate(Route::Settings)],
            KeyCode::Esc | KeyCode::Backspace => return vec![Action::Back],
            _ => {}
        }

        if self.state.route == Route::Home {
            let page = (self.pane_areas.home_body.height / 2).max(1) as i32;
            match key.code {
                KeyCode::Char('r') => return vec![Action::Refresh],
                KeyCode::PageUp => return vec![Action::ScrollBy(-page)],
                KeyCode::PageDown => return vec![Action::ScrollBy(page)],
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::QuickPicks) => self.quick_picks.handle_key(key, s),
            Some(ComponentId::Trending) => self.trending.handle_key(key, s),
            Some(ComponentId::Downloads) => self.downloads.handle_key(key, s),
            Some(ComponentId::Settings) => self.settings.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_)
                | MouseEventKind::ScrollUp
                | MouseEventKind::ScrollDown
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight
        );
        if !is_click {
            return vec![];
        }
        let (col, row) = (event.column, event.row);

        if self.help_overlay.visible {
            return match event.kind {
                MouseEventKind::Down(_) => vec![Action::ToggleHelp],
                _ => vec![],
            };
        }

        // The song menu is modal: a click outside closes it.
        if self.song_menu.is_open() {
            let area = self.song_menu.area();
            if hit(area, col, row) {
                return self.song_menu.handle_mouse(event, area, &self.state);
            }
            return match event.kind {
                MouseEventKind::Down(_) => vec![Action::CloseSongMenu],
                _ => vec![],
            };
        }

        let screen = self.pane_areas.screen;
        match self.state.route {
            Route::Home => self.handle_home_mouse(event),
            Route::Downloads if hit(screen, col, row) => {
                self.downloads.handle_mouse(event, screen, &self.state)
            }
            Route::Settings if hit(screen, col, row) => {
                self.settings.handle_mouse(event, screen, &self.state)
            }
            _ => vec![],
        }
    }

    fn handle_home_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let areas = self.pane_areas;
        if !hit(areas.home_body, event.column, event.row) {
            return vec![];
        }
        match event.kind {
            MouseEventKind::ScrollUp => return vec![Action::ScrollBy(-1)],
            MouseEventKind::ScrollDown => return vec![Action::ScrollBy(1)],
            _ => {}
        }

        let offset = self.state.home.scroll_offset();
        let local = scroll_view::to_content(event, areas.home_body, offset);
        let s = &self.state;

        for (id, section) in [
            (self.quick_picks.id(), areas.quick_picks),
            (self.trending.id(), areas.trending),
        ] {
            let on_screen = scroll_view::project(section, areas.home_body, offset);
            if !hit(on_screen, event.column, event.row) {
                continue;
            }
            let mut actions = match id {
                ComponentId::QuickPicks => self.quick_picks.handle_mouse(local, section, s),
                _ => self.trending.handle_mouse(local, section, s),
            };
            if !self.focus.is_focused(id) {
                actions.insert(0, Action::FocusPane(id));
            }
            return actions;
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Components see every action first (selection resets, menu open/close).
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.quick_picks.on_action(&action, s));
            out.extend(self.trending.on_action(&action, s));
            out.extend(self.downloads.on_action(&action, s));
            out.extend(self.settings.on_action(&action, s));
            out.extend(self.song_menu.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Depth-limited to one level.
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        if !matches!(action, Action::Noop) {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Playback ──────────────────────────────────────────────────────
            Action::PlaySong(song) => {
                self.haptics.trigger(HapticKind::Light);
                self.send_player(PlayerCommand::Play(song)).await;
            }
            Action::TogglePause => self.send_player(PlayerCommand::TogglePause).await,
            Action::Stop => self.send_player(PlayerCommand::Stop).await,

            // ── Home feed ─────────────────────────────────────────────────────
            Action::Refresh => {
                if self.state.route != Route::Home {
                    return;
                }
                if self.state.home.state() == HomeState::Offline {
                    self.toast.warning(OFFLINE_TITLE);
                    return;
                }
                self.start_fetch(FetchTrigger::Refresh);
            }
            Action::ScrollBy(delta) => self.scroll_by(delta),
            Action::OpenSongMenu(_) => self.haptics.trigger(HapticKind::LongPress),
            Action::CloseSongMenu => {}

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.reveal_focused();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.reveal_focused();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.reveal_focused();
            }
            Action::Navigate(route) => {
                if route != self.state.route {
                    self.history.push(self.state.route);
                    self.enter_route(route);
                }
            }
            Action::Back => {
                if let Some(route) = self.history.pop() {
                    self.enter_route(route);
                }
            }

            // ── Library ───────────────────────────────────────────────────────
            Action::ExportLibrary => {
                self.haptics.trigger(HapticKind::Light);
                self.toast.spinner("Exporting library…");
                let library = self.library.clone();
                let tx = self.tx.clone();
                tokio::task::spawn_blocking(move || {
                    let result = library.export(chrono::Local::now());
                    let _ = tx.blocking_send(AppMessage::LibraryExported(result));
                });
            }
            Action::ImportLibrary => {
                self.haptics.trigger(HapticKind::Light);
                self.toast.spinner("Importing library…");
                let library = self.library.clone();
                let source = self.state.import_file.clone();
                let tx = self.tx.clone();
                tokio::task::spawn_blocking(move || {
                    let result = library.import(&source);
                    let _ = tx.blocking_send(AppMessage::LibraryImported(result));
                });
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.state.show_keys_bar = !self.state.show_keys_bar,

            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Start a fetch cycle in the background. Refreshes are refused unless the
    /// sections are on screen.
    fn start_fetch(&mut self, trigger: FetchTrigger) {
        let generation = match trigger {
            FetchTrigger::Mount => Some(self.state.home.start(FetchTrigger::Mount)),
            FetchTrigger::Refresh => self.state.home.request_refresh(),
        };
        let Some(generation) = generation else {
            debug!("home: {:?} ignored in state {:?}", trigger, self.state.home.state());
            return;
        };
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            run_fetch_cycle(catalog.as_ref(), generation, &tx).await;
        });
    }

    async fn send_player(&self, cmd: PlayerCommand) {
        if let Err(e) = self.player.send(cmd).await {
            warn!("player gone: {}", e);
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        if self.state.route != Route::Home {
            return;
        }
        let offset = self.state.home.scroll_offset();
        // Pull-to-refresh: scrolling up past the top.
        if delta < 0 && offset == 0 {
            self.start_fetch(FetchTrigger::Refresh);
            return;
        }
        let max = scroll_view::max_offset(
            self.pane_areas.content_height,
            self.pane_areas.home_body.height,
        );
        let next = (offset as i32 + delta).clamp(0, max as i32) as u16;
        if self.state.home.on_scroll(next) {
            debug!("home: divider shown={}", self.state.home.show_divider());
        }
    }

    /// Scroll so the focused home section is fully in view.
    fn reveal_focused(&mut self) {
        let section = match self.focus.current() {
            Some(ComponentId::QuickPicks) => self.pane_areas.quick_picks,
            Some(ComponentId::Trending) => self.pane_areas.trending,
            _ => return,
        };
        let viewport = self.pane_areas.home_body.height;
        if section.height == 0 || viewport == 0 {
            return;
        }
        let offset = self.state.home.scroll_offset();
        let bottom = section.y + section.height;
        let target = if section.y < offset {
            section.y
        } else if bottom > offset + viewport {
            bottom.saturating_sub(viewport).min(section.y)
        } else {
            return;
        };
        self.state.home.on_scroll(target);
    }

    fn enter_route(&mut self, route: Route) {
        self.state.route = route;
        match route {
            Route::Downloads => {
                self.state.downloads = scan_downloads(&self.state.downloads_dir);
                self.downloads.sync(&self.state);
            }
            Route::Settings => match self.library.load() {
                Ok(data) => self.state.library = Some(summarize(&data)),
                Err(e) => {
                    warn!("library: {}", e);
                    self.state.library = None;
                }
            },
            Route::Home => {}
        }
        self.sync_focus();
    }

    /// Focus ring for the current screen; empty home sections are skipped.
    fn sync_focus(&mut self) {
        let items = match self.state.route {
            Route::Home => {
                let mut items = Vec::new();
                if !self.state.home.quick_picks().is_empty() {
                    items.push(ComponentId::QuickPicks);
                }
                if !self.state.home.trending().is_empty() {
                    items.push(ComponentId::Trending);
                }
                items
            }
            Route::Downloads => vec![ComponentId::Downloads],
            Route::Settings => vec![ComponentId::Settings],
        };
        self.focus.set_items(items);
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.state.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (header_area, divider_area, body_area, status_area) =
            (outer[0], outer[1], outer[2], outer[3]);

        self.header.draw(frame, header_area, &self.state);

        match self.state.route {
            Route::Home => {
                if self.state.home.show_divider() {
                    status_bar::draw_separator(frame, divider_area);
                }
                self.draw_home(frame, body_area);
                self.pane_areas.screen = Rect::default();
            }
            Route::Downloads => {
                status_bar::draw_separator(frame, divider_area);
                let focused = self.focus.is_focused(self.downloads.id());
                self.downloads.draw(frame, body_area, focused, &self.state);
                self.pane_areas.screen = body_area;
            }
            Route::Settings => {
                status_bar::draw_separator(frame, divider_area);
                let focused = self.focus.is_focused(self.settings.id());
                self.settings.draw(frame, body_area, focused, &self.state);
                self.pane_areas.screen = body_area;
            }
        }

        if self.state.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                status_area,
                self.state.route,
                self.state.home.reachability(),
            );
        }

        // ── Overlays ──────────────────────────────────────────────────────────
        self.song_menu.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);
        self.toast.draw(frame, area);
    }

    fn draw_home(&mut self, frame: &mut Frame, area: Rect) {
        self.pane_areas.home_body = area;
        self.pane_areas.quick_picks = Rect::default();
        self.pane_areas.trending = Rect::default();
        self.pane_areas.content_height = 0;

        match self.state.home.state() {
            HomeState::Offline => return offline::draw(frame, area),
            HomeState::Initializing | HomeState::Loading => {
                return loading::draw(frame, area, &self.state)
            }
            HomeState::Ready | HomeState::Refreshing => {}
        }

        let qp_h = QuickPicks::height(&self.state);
        let tr_h = Trending::height(&self.state);
        if qp_h == 0 && tr_h == 0 {
            status_bar::draw_hint(
                frame,
                Rect { height: 1.min(area.height), ..area },
                " Nothing here yet. Press r to refresh.",
            );
            return;
        }

        let gap = u16::from(qp_h > 0 && tr_h > 0);
        let content_h = qp_h + gap + tr_h;
        let qp_rect = Rect::new(0, 0, area.width, qp_h);
        let tr_rect = Rect::new(0, qp_h + gap, area.width, tr_h);

        let mut canvas = scroll_view::canvas(area, content_h);
        canvas.set_style(canvas.area, Style::default().bg(C_BG));
        let focused = self.focus.current();
        self.quick_picks.render(
            qp_rect,
            &mut canvas,
            focused == Some(ComponentId::QuickPicks),
            &self.state,
        );
        self.trending.render(
            tr_rect,
            &mut canvas,
            focused == Some(ComponentId::Trending),
            &self.state,
        );

        let max = scroll_view::max_offset(content_h, area.height);
        if self.state.home.scroll_offset() > max {
            self.state.home.on_scroll(max);
        }
        scroll_view::blit(
            &canvas,
            self.state.home.scroll_offset(),
            frame.buffer_mut(),
            area,
        );

        self.pane_areas.quick_picks = qp_rect;
        self.pane_areas.trending = tr_rect;
        self.pane_areas.content_height = content_h;
    }
}

fn summarize(data: &LibraryData) -> LibrarySummary {
    LibrarySummary {
        playlists: data.playlists.len(),
        favorites: data.favorites.len(),
    }
}
