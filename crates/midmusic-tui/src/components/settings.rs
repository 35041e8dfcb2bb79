//! Settings: library management and app info.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::pane_chrome::pane_chrome,
};

pub const PROJECT_URL: &str = "https://github.com/MidknightMantra/MidMusic";

const BUTTONS: [(&str, &str); 2] = [
    ("⇪", "Import Library"),
    ("⇩", "Export Library"),
];

/// Rows above the first button inside the panel.
const BUTTONS_TOP: u16 = 4;

pub struct Settings {
    selected: usize,
}

impl Settings {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    fn activate(&self) -> Vec<Action> {
        match self.selected {
            0 => vec![Action::ImportLibrary],
            _ => vec![Action::ExportLibrary],
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Settings {
    fn id(&self) -> ComponentId {
        ComponentId::Settings
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = 0,
            KeyCode::Down | KeyCode::Char('j') => self.selected = 1,
            KeyCode::Char('i') => return vec![Action::ImportLibrary],
            KeyCode::Char('e') => return vec![Action::ExportLibrary],
            KeyCode::Enter => return self.activate(),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let first = area.y + 1 + BUTTONS_TOP;
        match event.row.checked_sub(first) {
            Some(rel) if (rel as usize) < BUTTONS.len() => {
                self.selected = rel as usize;
                self.activate()
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("Settings", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(
                " Library Management",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Backup your playlists and favorite tracks, or import them from a file.",
                Style::default().fg(C_SECONDARY),
            )),
            Line::from(""),
            Line::from(""),
        ];
        for (i, (icon, label)) in BUTTONS.iter().enumerate() {
            let selected = i == self.selected;
            let style = if selected {
                Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            let marker = if selected && focused { "▍" } else { " " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(C_ACCENT)),
                Span::styled(format!(" {icon}  {label} "), style),
            ]));
        }
        lines.push(Line::from(""));
        if let Some(summary) = state.library {
            lines.push(Line::from(Span::styled(
                format!(
                    " Library: {} playlists, {} favorites",
                    summary.playlists, summary.favorites
                ),
                Style::default().fg(C_MUTED),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!(" Exports go to {}", state.export_dir.display()),
            Style::default().fg(C_MUTED),
        )));
        lines.push(Line::from(Span::styled(
            format!(" Imports read {}", state.import_file.display()),
            Style::default().fg(C_MUTED),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[0]);

        let footer = vec![
            Line::from(Span::styled(PROJECT_URL, Style::default().fg(C_SECONDARY))),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(C_MUTED),
            )),
        ];
        frame.render_widget(
            Paragraph::new(footer).alignment(ratatui::layout::Alignment::Center),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{click, key, state_with};

    #[test]
    fn buttons_map_to_library_actions() {
        let state = state_with(0, 0);
        let mut settings = Settings::new();
        assert!(matches!(
            &settings.handle_key(key(KeyCode::Enter), &state)[..],
            [Action::ImportLibrary]
        ));
        settings.handle_key(key(KeyCode::Down), &state);
        assert!(matches!(
            &settings.handle_key(key(KeyCode::Enter), &state)[..],
            [Action::ExportLibrary]
        ));

        let area = Rect::new(0, 0, 80, 20);
        let actions = settings.handle_mouse(click(4, 1 + BUTTONS_TOP), area, &state);
        assert!(matches!(&actions[..], [Action::ImportLibrary]));
        assert!(settings.handle_mouse(click(4, 1), area, &state).is_empty());
    }
}
