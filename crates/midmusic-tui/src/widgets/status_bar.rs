//! Status bar: bottom line with the active screen, reachability and keys.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use midmusic_core::network::Reachability;

use crate::action::Route;
use crate::theme::{C_ACCENT, C_MUTED, C_OFFLINE, C_SECONDARY, C_SEPARATOR, C_TOAST_SUCCESS};

fn keys_for(route: Route) -> &'static str {
    match route {
        Route::Home => {
            " ←→/hl move  ↑↓/jk row  Enter play  m menu  Space pause  x stop  Tab section  r refresh  d downloads  , settings  ? help  q quit"
        }
        Route::Downloads => " ↑↓/jk select  Enter play  Space pause  x stop  Esc back  ? help  q quit",
        Route::Settings => " ↑↓/jk select  Enter run  Esc back  ? help  q quit",
    }
}

/// Draw a horizontal hairline.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, route: Route, reachability: Reachability) {
    let bulb = match reachability {
        Reachability::Reachable => C_TOAST_SUCCESS,
        Reachability::Unreachable => C_OFFLINE,
        Reachability::Unknown => C_MUTED,
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", route.label()),
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("●", Style::default().fg(bulb).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(keys_for(route), Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw a one-line hint in secondary text (used when the keys bar is hidden).
pub fn draw_hint(frame: &mut Frame, area: Rect, hint: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(C_SECONDARY))),
        area,
    );
}
