//! Color palette and style constants for the MidMusic TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(2, 4, 10);
pub const C_SURFACE: Color = Color::Rgb(15, 18, 29);
pub const C_PRIMARY: Color = Color::Rgb(243, 244, 246);
pub const C_SECONDARY: Color = Color::Rgb(156, 163, 175);
pub const C_MUTED: Color = Color::Rgb(75, 85, 99);
pub const C_ACCENT: Color = Color::Rgb(99, 102, 241); // tint
pub const C_ACCENT_DIM: Color = Color::Rgb(55, 57, 140);
pub const C_SEPARATOR: Color = Color::Rgb(31, 36, 51);
pub const C_SELECTION_BG: Color = Color::Rgb(24, 28, 45);
pub const C_PANEL_BORDER: Color = Color::Rgb(31, 36, 51);
pub const C_PANEL_BORDER_FOCUSED: Color = C_ACCENT;
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 96, 128);
pub const C_RANK: Color = Color::Rgb(129, 140, 248);
pub const C_OFFLINE: Color = Color::Rgb(251, 191, 36);
pub const C_TOAST_INFO: Color = Color::Rgb(96, 165, 250);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(52, 211, 153);
pub const C_TOAST_WARNING: Color = Color::Rgb(251, 191, 36);
pub const C_TOAST_ERROR: Color = Color::Rgb(248, 113, 113);

/// Swatches standing in for cover art.
pub const ARTWORK_SWATCHES: [Color; 6] = [
    Color::Rgb(99, 102, 241),
    Color::Rgb(236, 72, 153),
    Color::Rgb(20, 184, 166),
    Color::Rgb(245, 158, 11),
    Color::Rgb(139, 92, 246),
    Color::Rgb(59, 130, 246),
];

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_accent() -> Style {
    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
}

pub fn style_heading() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
