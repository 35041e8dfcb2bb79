//! Quick Picks: two rows of songs scrolling together horizontally.
//!
//! Column `i` stacks song `i` over song `i + ceil(n/2)`; see
//! [`midmusic_core::layout::quick_pick_columns`].

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{buffer::Buffer, layout::Rect, Frame};

use midmusic_core::layout::{quick_pick_columns, SongCard};
use midmusic_core::normalize::SectionKind;
use midmusic_core::song::Song;

use crate::{
    action::{Action, ComponentId, MenuRequest},
    app_state::AppState,
    component::Component,
    components::draw_heading,
    widgets::{
        column_strip::ColumnStrip,
        song_card::{render_card, CardOptions, QUICK_PICK_CARD_HEIGHT},
    },
};

const COLUMN_WIDTH: u16 = 32;
const CARD_GAP: u16 = 2;
const ROW_STRIDE: u16 = QUICK_PICK_CARD_HEIGHT + 1;

pub struct QuickPicks {
    strip: ColumnStrip,
    /// 0 = top row, 1 = bottom row.
    row: usize,
    visible: usize,
}

impl QuickPicks {
    pub fn new() -> Self {
        Self {
            strip: ColumnStrip::new(),
            row: 0,
            visible: 1,
        }
    }

    /// Rows this section occupies; zero when there is nothing to show.
    pub fn height(state: &AppState) -> u16 {
        if state.home.quick_picks().is_empty() {
            0
        } else {
            1 + 2 * ROW_STRIDE
        }
    }

    /// Re-clamp selection after the song list changed.
    pub fn sync(&mut self, state: &AppState) {
        let columns = quick_pick_columns(state.home.quick_picks());
        self.strip.set_len(columns.len());
        let has_bottom = columns
            .get(self.strip.selected)
            .is_some_and(|c| c.bottom.is_some());
        if !has_bottom {
            self.row = 0;
        }
    }

    fn song_at<'a>(&self, state: &'a AppState, column: usize, row: usize) -> Option<&'a Song> {
        let columns = quick_pick_columns(state.home.quick_picks());
        let column = columns.get(column)?;
        if row == 0 {
            Some(column.top)
        } else {
            column.bottom
        }
    }

    fn selected_song<'a>(&self, state: &'a AppState) -> Option<&'a Song> {
        self.song_at(state, self.strip.selected, self.row)
    }

    /// Render in whatever buffer the caller provides (frame or scroll canvas).
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool, state: &AppState) {
        let songs = state.home.quick_picks();
        if songs.is_empty() || area.height == 0 {
            return;
        }
        let columns = quick_pick_columns(songs);
        self.strip.set_len(columns.len());
        self.visible = ColumnStrip::fit(area.width, COLUMN_WIDTH).max(1);
        self.strip.ensure_visible(self.visible);

        draw_heading(
            buf,
            area,
            SectionKind::QuickPicks.heading(),
            focused,
            self.strip.has_more_left(),
            self.strip.has_more_right(self.visible),
        );

        let active = state.active_track_id();
        for (slot, idx) in self.strip.visible_range(self.visible).enumerate() {
            let column = &columns[idx];
            let x = area.x + slot as u16 * COLUMN_WIDTH;
            for (row, song) in column.songs().enumerate() {
                let y = area.y + 1 + row as u16 * ROW_STRIDE;
                if y + QUICK_PICK_CARD_HEIGHT > area.y + area.height {
                    break;
                }
                let card = SongCard::new(song, active);
                let opts = CardOptions {
                    title_lines: 1,
                    selected: focused && idx == self.strip.selected && row == self.row,
                    frame: state.frame,
                    ..Default::default()
                };
                let rect = Rect::new(
                    x,
                    y,
                    (COLUMN_WIDTH - CARD_GAP).min(area.width),
                    QUICK_PICK_CARD_HEIGHT,
                );
                render_card(&card, &opts, rect, buf);
            }
        }
    }

    /// Column slot and row under a content-space position, if any.
    fn hit(&self, area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
        let rel_y = row.checked_sub(area.y + 1)?;
        let card_row = (rel_y / ROW_STRIDE) as usize;
        if card_row > 1 || rel_y % ROW_STRIDE >= QUICK_PICK_CARD_HEIGHT {
            return None;
        }
        let slot = (column.checked_sub(area.x)? / COLUMN_WIDTH) as usize;
        Some((slot, card_row))
    }
}

impl Default for QuickPicks {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QuickPicks {
    fn id(&self) -> ComponentId {
        ComponentId::QuickPicks
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.strip.select_left(1),
            KeyCode::Right | KeyCode::Char('l') => self.strip.select_right(1),
            KeyCode::Home | KeyCode::Char('g') => self.strip.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.strip.select_last(),
            KeyCode::Up | KeyCode::Char('k') => self.row = 0,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.row == 1 || self.song_at(state, self.strip.selected, 1).is_none() {
                    return vec![Action::FocusPane(ComponentId::Trending)];
                }
                self.row = 1;
            }
            KeyCode::Enter => {
                if let Some(song) = self.selected_song(state) {
                    return vec![Action::PlaySong(song.clone())];
                }
            }
            KeyCode::Char('m') => {
                if let Some(song) = self.selected_song(state) {
                    return vec![Action::OpenSongMenu(MenuRequest::for_song(song))];
                }
            }
            _ => {}
        }
        self.sync(state);
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollLeft => self.strip.select_left(1),
            MouseEventKind::ScrollRight => self.strip.select_right(1),
            MouseEventKind::Down(button) => {
                let Some((slot, row)) = self.hit(area, event.column, event.row) else {
                    return vec![];
                };
                let column = self.strip.scroll_offset + slot;
                let Some(song) = self.song_at(state, column, row) else {
                    return vec![];
                };
                self.strip.handle_click(slot);
                self.row = row;
                return match button {
                    MouseButton::Right => vec![Action::OpenSongMenu(MenuRequest::for_song(song))],
                    _ => vec![Action::PlaySong(song.clone())],
                };
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if let Action::Refresh = action {
            self.strip.select_first();
            self.row = 0;
        }
        self.sync(state);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.render(area, frame.buffer_mut(), focused, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{key, state_with};
    use midmusic_core::home::FetchTrigger;

    #[test]
    fn enter_plays_selected_song_across_rows() {
        // 5 songs → columns (s0,s3) (s1,s4) (s2,-)
        let state = state_with(5, 0);
        let mut qp = QuickPicks::new();
        qp.sync(&state);

        qp.handle_key(key(KeyCode::Right), &state);
        qp.handle_key(key(KeyCode::Down), &state);
        let actions = qp.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(&actions[..], [Action::PlaySong(s)] if s.id == "q4"));

        // Last column has no bottom song: Down moves on to Trending.
        qp.handle_key(key(KeyCode::Up), &state);
        qp.handle_key(key(KeyCode::Right), &state);
        let actions = qp.handle_key(key(KeyCode::Down), &state);
        assert!(matches!(
            &actions[..],
            [Action::FocusPane(ComponentId::Trending)]
        ));
        let actions = qp.handle_key(key(KeyCode::Char('m')), &state);
        assert!(matches!(&actions[..], [Action::OpenSongMenu(r)] if r.song_data.contains("\"q2\"")));
    }

    #[test]
    fn empty_section_has_no_height() {
        let mut state = state_with(0, 0);
        assert_eq!(QuickPicks::height(&state), 0);
        state.home.start(FetchTrigger::Mount);
        assert_eq!(QuickPicks::height(&state), 0);
        assert_eq!(QuickPicks::height(&state_with(1, 0)), 7);
    }

    #[test]
    fn render_marks_now_playing() {
        let mut state = state_with(2, 0);
        state.now_playing = Some(state.home.quick_picks()[1].clone());
        let area = Rect::new(0, 0, 64, QuickPicks::height(&state));
        let mut buf = Buffer::empty(area);
        QuickPicks::new().render(area, &mut buf, true, &state);
        // Second song is the bottom of column 0; the pulse sits in its gutter.
        let pulse_x = COLUMN_WIDTH - CARD_GAP - 1;
        assert_ne!(buf[(pulse_x, 1 + ROW_STRIDE + 1)].symbol(), " ");
        assert_eq!(buf[(pulse_x, 2u16)].symbol(), " ");
    }
}
