//! AppState: shared read-only data passed to all components during render/event.
//!
//! The App event loop is the only thing that writes to AppState.

use std::path::PathBuf;

use midmusic_core::home::HomeController;
use midmusic_core::song::Song;

use crate::action::Route;

/// A playable file in the downloads directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<std::time::SystemTime>,
}

/// Counts shown on the settings screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LibrarySummary {
    pub playlists: usize,
    pub favorites: usize,
}

pub struct AppState {
    // ── Navigation ──────────────────────────────────────────────────────────
    pub route: Route,

    // ── Home feed ───────────────────────────────────────────────────────────
    pub home: HomeController,

    // ── Playback (mirrors the playback context) ─────────────────────────────
    pub now_playing: Option<Song>,
    pub paused: bool,

    // ── Downloads / library ─────────────────────────────────────────────────
    pub downloads: Vec<LocalFile>,
    pub downloads_dir: PathBuf,
    pub library: Option<LibrarySummary>,
    pub export_dir: PathBuf,
    pub import_file: PathBuf,

    // ── UI ──────────────────────────────────────────────────────────────────
    /// Animation frame counter, advanced by the UI tick.
    pub frame: usize,
    pub show_keys_bar: bool,
}

impl AppState {
    pub fn new(downloads_dir: PathBuf, export_dir: PathBuf, import_file: PathBuf) -> Self {
        Self {
            route: Route::default(),
            home: HomeController::new(),
            now_playing: None,
            paused: false,
            downloads: Vec::new(),
            downloads_dir,
            library: None,
            export_dir,
            import_file,
            frame: 0,
            show_keys_bar: true,
        }
    }

    pub fn active_track_id(&self) -> Option<&str> {
        self.now_playing.as_ref().map(|s| s.id.as_str())
    }
}
