//! Action enum: all user-initiated intents and internal events.

use serde::{Deserialize, Serialize};

use midmusic_core::song::Song;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    QuickPicks,
    Trending,
    Downloads,
    Settings,
    SongMenu,
    HelpOverlay,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Settings,
    Downloads,
}

impl Route {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Settings => "SETTINGS",
            Self::Downloads => "DOWNLOADS",
        }
    }
}

/// Discriminator for the contextual menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Song,
}

/// What the contextual menu is opened with: the serialized song plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRequest {
    pub song_data: String,
    pub kind: MenuKind,
}

impl MenuRequest {
    pub fn for_song(song: &Song) -> Self {
        Self {
            song_data: song.to_payload(),
            kind: MenuKind::Song,
        }
    }
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    PlaySong(Song),
    TogglePause,
    Stop,

    // ── Home feed ────────────────────────────────────────────────────────────
    Refresh,
    /// Scroll the home feed by a signed number of rows.
    ScrollBy(i32),
    OpenSongMenu(MenuRequest),
    CloseSongMenu,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    Navigate(Route),
    Back,

    // ── Library ──────────────────────────────────────────────────────────────
    ExportLibrary,
    ImportLibrary,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_request_carries_song_payload() {
        let song = Song::new("abc", "Title", "Artist", "https://img");
        let req = MenuRequest::for_song(&song);
        assert_eq!(req.kind, MenuKind::Song);
        assert_eq!(Song::from_payload(&req.song_data).unwrap(), song);
        assert_eq!(serde_json::to_string(&req.kind).unwrap(), "\"song\"");
    }
}
