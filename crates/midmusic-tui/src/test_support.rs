//! Builders shared by component tests.

use std::path::PathBuf;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use midmusic_core::home::{FeedEvent, FetchTrigger};
use midmusic_core::normalize::SectionKind;
use midmusic_core::song::Song;

use crate::app_state::AppState;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn click(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// A mounted home with `quick` songs `q0..` and `trending` songs `t0..`.
pub fn state_with(quick: usize, trending: usize) -> AppState {
    let mut state = AppState::new(
        PathBuf::from("downloads"),
        PathBuf::from("exports"),
        PathBuf::from("import.json"),
    );
    let g = state.home.start(FetchTrigger::Mount);
    for (kind, prefix, n) in [
        (SectionKind::QuickPicks, "q", quick),
        (SectionKind::Trending, "t", trending),
    ] {
        let songs = (0..n)
            .map(|i| {
                Song::new(
                    format!("{prefix}{i}"),
                    format!("Song {prefix}{i}"),
                    "Artist",
                    format!("https://img/{prefix}{i}.jpg"),
                )
            })
            .collect();
        state.home.apply(FeedEvent::Section {
            generation: g,
            kind,
            outcome: Ok(songs),
        });
    }
    state.home.apply(FeedEvent::Done { generation: g });
    state
}
