//! Offline notice. Replaces the home sections whenever reachability is
//! `Unreachable`, whatever the fetch state.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_OFFLINE, C_PRIMARY, C_SECONDARY};

pub const OFFLINE_TITLE: &str = "You're offline";

pub fn draw(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "⚠",
            Style::default().fg(C_OFFLINE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            OFFLINE_TITLE,
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Check your connection. Your downloads still play.",
            Style::default().fg(C_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("d", Style::default().fg(C_PRIMARY)),
            Span::styled(" open downloads", Style::default().fg(C_MUTED)),
        ]),
    ];
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, top, area.width, height),
    );
}
