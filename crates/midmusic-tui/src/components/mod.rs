pub mod downloads;
pub mod header;
pub mod help_overlay;
pub mod loading;
pub mod offline;
pub mod quick_picks;
pub mod settings;
pub mod song_menu;
pub mod trending;

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, text::Span};

use crate::theme::{style_accent, style_heading, C_MUTED};

/// Section heading row: focus marker, title, and scroll hints.
pub(crate) fn draw_heading(
    buf: &mut Buffer,
    area: Rect,
    title: &str,
    focused: bool,
    more_left: bool,
    more_right: bool,
) {
    let marker = if focused { "▍" } else { " " };
    buf.set_span(area.x, area.y, &Span::styled(marker, style_accent()), 1);
    buf.set_span(
        area.x + 2,
        area.y,
        &Span::styled(title, style_heading().add_modifier(Modifier::BOLD)),
        area.width.saturating_sub(2),
    );
    let hints = match (more_left, more_right) {
        (true, true) => "‹ ›",
        (true, false) => "‹  ",
        (false, true) => "  ›",
        (false, false) => return,
    };
    if area.width > 4 {
        buf.set_span(
            area.x + area.width - 4,
            area.y,
            &Span::styled(hints, ratatui::style::Style::default().fg(C_MUTED)),
            3,
        );
    }
}

/// A `percent_x`-wide, `height`-tall rect centred in `r`.
pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    use ratatui::layout::{Constraint, Direction, Layout};

    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
