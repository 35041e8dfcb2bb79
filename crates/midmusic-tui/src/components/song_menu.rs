//! SongMenu: contextual popup opened with a serialized song payload.
//!
//! The menu only ever sees the payload string; a payload that does not decode
//! leaves the menu closed.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use tracing::warn;

use midmusic_core::song::Song;

use crate::{
    action::{Action, ComponentId, MenuKind, MenuRequest},
    app_state::AppState,
    component::Component,
    components::centered_rect,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{pane_chrome::pane_chrome, song_card::truncate},
};

const OPTIONS: [&str; 2] = ["Play", "Close"];
const POPUP_HEIGHT: u16 = 7;

pub struct SongMenu {
    song: Option<Song>,
    selected: usize,
    area: Rect,
}

impl SongMenu {
    pub fn new() -> Self {
        Self {
            song: None,
            selected: 0,
            area: Rect::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.song.is_some()
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Last drawn popup rect, for mouse hit-testing.
    pub fn area(&self) -> Rect {
        self.area
    }

    fn open(&mut self, request: &MenuRequest) {
        let MenuKind::Song = request.kind;
        match Song::from_payload(&request.song_data) {
            Ok(song) => {
                self.song = Some(song);
                self.selected = 0;
            }
            Err(e) => warn!("song menu: bad payload: {}", e),
        }
    }

    fn choose(&self) -> Vec<Action> {
        match (self.selected, &self.song) {
            (0, Some(song)) => vec![Action::PlaySong(song.clone()), Action::CloseSongMenu],
            _ => vec![Action::CloseSongMenu],
        }
    }
}

impl Default for SongMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SongMenu {
    fn id(&self) -> ComponentId {
        ComponentId::SongMenu
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_open() {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = 0,
            KeyCode::Down | KeyCode::Char('j') => self.selected = OPTIONS.len() - 1,
            KeyCode::Enter => return self.choose(),
            KeyCode::Char('p') => {
                self.selected = 0;
                return self.choose();
            }
            KeyCode::Esc | KeyCode::Char('m') => return vec![Action::CloseSongMenu],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        // Options sit on the last rows inside the border.
        let first = area.y + area.height.saturating_sub(1 + OPTIONS.len() as u16);
        match event.row.checked_sub(first) {
            Some(rel) if (rel as usize) < OPTIONS.len() => {
                self.selected = rel as usize;
                self.choose()
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSongMenu(request) => self.open(request),
            Action::CloseSongMenu | Action::Navigate(_) | Action::Back => self.song = None,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let Some(song) = &self.song else {
            self.area = Rect::default();
            return;
        };
        let popup = centered_rect(50, POPUP_HEIGHT, area);
        self.area = popup;

        let block = pane_chrome("Song", None, true, None);
        let inner = block.inner(popup);
        let width = inner.width.saturating_sub(2) as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", truncate(&song.title, width)),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", truncate(&song.artist, width)),
                Style::default().fg(C_SECONDARY),
            )),
            Line::from(""),
        ];
        for (i, label) in OPTIONS.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(C_ACCENT)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_MUTED)
            };
            lines.push(Line::from(Span::styled(format!(" {label} "), style)));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{key, state_with};

    #[test]
    fn opens_from_payload_and_plays() {
        let state = state_with(0, 0);
        let song = Song::new("abc", "Night Drive", "Neon Coast", "https://img");
        let mut menu = SongMenu::new();
        menu.on_action(&Action::OpenSongMenu(MenuRequest::for_song(&song)), &state);
        assert_eq!(menu.song(), Some(&song));

        let actions = menu.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(
            &actions[..],
            [Action::PlaySong(s), Action::CloseSongMenu] if *s == song
        ));

        menu.handle_key(key(KeyCode::Down), &state);
        assert!(matches!(
            &menu.handle_key(key(KeyCode::Enter), &state)[..],
            [Action::CloseSongMenu]
        ));
        menu.on_action(&Action::CloseSongMenu, &state);
        assert!(!menu.is_open());
    }

    #[test]
    fn bad_payload_keeps_menu_closed() {
        let state = state_with(0, 0);
        let mut menu = SongMenu::new();
        menu.on_action(
            &Action::OpenSongMenu(MenuRequest {
                song_data: "{\"title\":\"no id\"}".to_string(),
                kind: MenuKind::Song,
            }),
            &state,
        );
        assert!(!menu.is_open());
    }
}
