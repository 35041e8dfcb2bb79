//! Full-screen spinner shown while the first fetch cycle runs.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    theme::{C_ACCENT, C_SECONDARY},
    widgets::toast::SPINNER_FRAMES,
};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }
    let spinner = SPINNER_FRAMES[state.frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(C_ACCENT)),
        Span::styled("  Loading your music…", Style::default().fg(C_SECONDARY)),
    ]);
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1),
    );
}
