//! Header: 2-row top bar.
//!
//! Row 1: greeting, refresh spinner, settings/downloads shortcuts.
//! Row 2: app title, now-playing song with its pause state.
//!
//! Not focusable.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY},
    widgets::{song_card::truncate, toast::SPINNER_FRAMES},
};

pub const GREETING: &str = "Welcome back,";
pub const APP_TITLE: &str = "MidMusic";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        // ── Row 1 ─────────────────────────────────────────────────────────────
        let mut left = vec![Span::styled(
            format!(" {GREETING}"),
            Style::default().fg(C_SECONDARY),
        )];
        if state.home.is_refreshing() {
            let spinner = SPINNER_FRAMES[state.frame % SPINNER_FRAMES.len()];
            left.push(Span::styled(
                format!("  {spinner} refreshing"),
                Style::default().fg(C_ACCENT),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(left)), rows[0]);

        let shortcuts = Line::from(vec![
            Span::styled("d", Style::default().fg(C_PRIMARY)),
            Span::styled(" downloads  ", Style::default().fg(C_MUTED)),
            Span::styled(",", Style::default().fg(C_PRIMARY)),
            Span::styled(" settings ⚙ ", Style::default().fg(C_MUTED)),
        ]);
        frame.render_widget(
            Paragraph::new(shortcuts).alignment(ratatui::layout::Alignment::Right),
            rows[0],
        );

        // ── Row 2 ─────────────────────────────────────────────────────────────
        if rows[1].height == 0 {
            return;
        }
        let mut spans = vec![Span::styled(
            format!(" {APP_TITLE}"),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )];
        if let Some(song) = &state.now_playing {
            let (glyph, color) = if state.paused {
                ("⏸", C_SECONDARY)
            } else {
                ("▶", C_ACCENT)
            };
            let budget = (rows[1].width as usize).saturating_sub(APP_TITLE.len() + 8);
            let label = truncate(&format!("{} · {}", song.title, song.artist), budget);
            spans.push(Span::raw("   "));
            spans.push(Span::styled(glyph, Style::default().fg(color)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label, Style::default().fg(C_SECONDARY)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with;
    use midmusic_core::song::Song;
    use ratatui::{backend::TestBackend, Terminal};

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_greeting_title_and_now_playing() {
        let mut state = state_with(0, 0);
        state.now_playing = Some(Song::new("a", "Night Drive", "Neon Coast", "u"));
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        terminal
            .draw(|f| Header::new().draw(f, f.area(), &state))
            .unwrap();

        assert!(row_text(&terminal, 0).starts_with(" Welcome back,"));
        let second = row_text(&terminal, 1);
        assert!(second.starts_with(" MidMusic"));
        assert!(second.contains("Night Drive · Neon Coast"));
    }
}
