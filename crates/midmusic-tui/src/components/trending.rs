//! Trending: columns of four ranked songs, scrolling horizontally.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{buffer::Buffer, layout::Rect, Frame};

use midmusic_core::layout::{trending_columns, RankedSong, SongCard, TRENDING_ROWS};
use midmusic_core::normalize::SectionKind;

use crate::{
    action::{Action, ComponentId, MenuRequest},
    app_state::AppState,
    component::Component,
    components::draw_heading,
    widgets::{
        column_strip::ColumnStrip,
        song_card::{render_card, CardOptions, TRENDING_CARD_HEIGHT},
    },
};

const COLUMN_WIDTH: u16 = 36;
const CARD_GAP: u16 = 2;
const ROW_STRIDE: u16 = TRENDING_CARD_HEIGHT + 1;
/// Width of the "⋮" hit zone at the right edge of a card.
const MENU_ZONE: u16 = 2;

pub struct Trending {
    strip: ColumnStrip,
    row: usize,
    visible: usize,
}

impl Trending {
    pub fn new() -> Self {
        Self {
            strip: ColumnStrip::new(),
            row: 0,
            visible: 1,
        }
    }

    pub fn height(state: &AppState) -> u16 {
        if state.home.trending().is_empty() {
            0
        } else {
            1 + TRENDING_ROWS as u16 * ROW_STRIDE
        }
    }

    pub fn sync(&mut self, state: &AppState) {
        let columns = trending_columns(state.home.trending());
        self.strip.set_len(columns.len());
        let rows = columns
            .get(self.strip.selected)
            .map_or(0, |c| c.entries.len());
        self.row = self.row.min(rows.saturating_sub(1));
    }

    fn entry_at<'a>(&self, state: &'a AppState, column: usize, row: usize) -> Option<RankedSong<'a>> {
        trending_columns(state.home.trending())
            .get(column)
            .and_then(|c| c.entries.get(row).copied())
    }

    fn selected<'a>(&self, state: &'a AppState) -> Option<RankedSong<'a>> {
        self.entry_at(state, self.strip.selected, self.row)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool, state: &AppState) {
        let songs = state.home.trending();
        if songs.is_empty() || area.height == 0 {
            return;
        }
        let columns = trending_columns(songs);
        self.strip.set_len(columns.len());
        self.visible = ColumnStrip::fit(area.width, COLUMN_WIDTH).max(1);
        self.strip.ensure_visible(self.visible);

        draw_heading(
            buf,
            area,
            SectionKind::Trending.heading(),
            focused,
            self.strip.has_more_left(),
            self.strip.has_more_right(self.visible),
        );

        let active = state.active_track_id();
        for (slot, idx) in self.strip.visible_range(self.visible).enumerate() {
            let x = area.x + slot as u16 * COLUMN_WIDTH;
            for (row, entry) in columns[idx].entries.iter().enumerate() {
                let y = area.y + 1 + row as u16 * ROW_STRIDE;
                if y + TRENDING_CARD_HEIGHT > area.y + area.height {
                    break;
                }
                let card = SongCard::new(entry.song, active);
                let opts = CardOptions {
                    rank: Some(entry.rank),
                    title_lines: 2,
                    selected: focused && idx == self.strip.selected && row == self.row,
                    menu_hint: true,
                    frame: state.frame,
                };
                let rect = Rect::new(
                    x,
                    y,
                    (COLUMN_WIDTH - CARD_GAP).min(area.width),
                    TRENDING_CARD_HEIGHT,
                );
                render_card(&card, &opts, rect, buf);
            }
        }
    }
}

impl Default for Trending {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Trending {
    fn id(&self) -> ComponentId {
        ComponentId::Trending
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
            KeyCode::Up | KeyCode::Char('k') => {
                if self.row == 0 {
                    return vec![Action::FocusPane(ComponentId::QuickPicks)];
                }
                self.row -= 1;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.entry_at(state, self.strip.selected, self.row + 1).is_some() {
                    self.row += 1;
                } else {
                    return vec![Action::ScrollBy(1)];
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected(state) {
                    return vec![Action::PlaySong(entry.song.clone())];
                }
            }
            KeyCode::Char('m') => {
                if let Some(entry) = self.selected(state) {
                    return vec![Action::OpenSongMenu(MenuRequest::for_song(entry.song))];
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
                let Some(rel_y) = event.row.checked_sub(area.y + 1) else {
                    return vec![];
                };
                let Some(rel_x) = event.column.checked_sub(area.x) else {
                    return vec![];
                };
                if rel_y % ROW_STRIDE >= TRENDING_CARD_HEIGHT {
                    return vec![];
                }
                let row = (rel_y / ROW_STRIDE) as usize;
                let slot = (rel_x / COLUMN_WIDTH) as usize;
                let within = rel_x % COLUMN_WIDTH;
                let Some(entry) = self.entry_at(state, self.strip.scroll_offset + slot, row) else {
                    return vec![];
                };
                self.strip.handle_click(slot);
                self.row = row;

                let card_width = COLUMN_WIDTH - CARD_GAP;
                let on_menu = within < card_width && within >= card_width - MENU_ZONE;
                return if button == MouseButton::Right || on_menu {
                    vec![Action::OpenSongMenu(MenuRequest::for_song(entry.song))]
                } else {
                    vec![Action::PlaySong(entry.song.clone())]
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
    use crate::test_support::{click, key, state_with};

    #[test]
    fn navigation_walks_ranked_columns() {
        let state = state_with(0, 10);
        let mut tr = Trending::new();
        tr.sync(&state);

        tr.handle_key(key(KeyCode::Right), &state);
        tr.handle_key(key(KeyCode::Down), &state);
        let actions = tr.handle_key(key(KeyCode::Enter), &state);
        // Column 1, row 1 → rank 6.
        assert!(matches!(&actions[..], [Action::PlaySong(s)] if s.id == "t5"));

        // The last column holds ranks 9 and 10 only.
        tr.handle_key(key(KeyCode::Char('G')), &state);
        assert_eq!(tr.selected(&state).map(|e| e.rank), Some(10));
        tr.handle_key(key(KeyCode::Down), &state);
        let actions = tr.handle_key(key(KeyCode::Down), &state);
        assert!(matches!(&actions[..], [Action::ScrollBy(1)]));
    }

    #[test]
    fn click_on_menu_hint_opens_menu() {
        let state = state_with(0, 4);
        let mut tr = Trending::new();
        let area = Rect::new(0, 0, 80, Trending::height(&state));
        let mut buf = Buffer::empty(area);
        tr.render(area, &mut buf, false, &state);
        assert_eq!(buf[(COLUMN_WIDTH - CARD_GAP - 1, 1u16)].symbol(), "⋮");
        assert_eq!(buf[(1u16, 1u16)].symbol(), "1");

        let actions = tr.handle_mouse(click(COLUMN_WIDTH - CARD_GAP - 1, 1 + ROW_STRIDE), area, &state);
        assert!(matches!(&actions[..], [Action::OpenSongMenu(r)] if r.song_data.contains("\"t1\"")));

        let actions = tr.handle_mouse(click(5, 1 + 2 * ROW_STRIDE), area, &state);
        assert!(matches!(&actions[..], [Action::PlaySong(s)] if s.id == "t2"));

        // Gap row between cards.
        assert!(tr.handle_mouse(click(5, ROW_STRIDE), area, &state).is_empty());
    }
}
