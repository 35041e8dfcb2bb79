//! Downloads: locally stored tracks, playable while offline.

use std::path::Path;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use midmusic_core::song::Song;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, LocalFile},
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct Downloads {
    selected: usize,
    list_state: ListState,
}

impl Downloads {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn sync(&mut self, state: &AppState) {
        self.selected = self.selected.min(state.downloads.len().saturating_sub(1));
    }

    fn play_selected(&self, state: &AppState) -> Vec<Action> {
        match state.downloads.get(self.selected) {
            Some(file) => vec![Action::PlaySong(Song::local(&file.path))],
            None => vec![],
        }
    }
}

impl Default for Downloads {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Downloads {
    fn id(&self) -> ComponentId {
        ComponentId::Downloads
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let last = state.downloads.len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(10),
            KeyCode::PageDown => self.selected = (self.selected + 10).min(last),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = last,
            KeyCode::Enter => return self.play_selected(state),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let last = state.downloads.len().saturating_sub(1);
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => self.selected = (self.selected + 1).min(last),
            MouseEventKind::Down(MouseButton::Left) => {
                // Inside the border: first list row is area.y + 1.
                let Some(rel) = event.row.checked_sub(area.y + 1) else {
                    return vec![];
                };
                let idx = self.list_state.offset() + rel as usize;
                if idx < state.downloads.len() {
                    self.selected = idx;
                    return self.play_selected(state);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = state.downloads.len().to_string();
        let block = pane_chrome(
            "Downloads",
            None,
            focused,
            Some(Badge {
                text: &count,
                color: C_SECONDARY,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.downloads.is_empty() {
            let hint = format!(" No downloads yet in {}", state.downloads_dir.display());
            frame.render_widget(
                Paragraph::new(Span::styled(hint, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let active = state.active_track_id();
        let items: Vec<ListItem> = state
            .downloads
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let is_current = active == Some(Song::local(&file.path).id.as_str());
                let is_selected = i == self.selected;
                let icon = if is_current { "▶" } else { "♪" };
                let name_style = if is_current {
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
                } else if is_selected {
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                let bg = if is_selected {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {icon}  "), Style::default().fg(C_MUTED)),
                    Span::styled(file.name.clone(), name_style),
                    Span::styled(
                        format!("  {}", fmt_size(file.size_bytes)),
                        Style::default().fg(C_MUTED),
                    ),
                ]))
                .style(bg)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}

// ── Directory scan ────────────────────────────────────────────────────────────

/// Playable files in `dir`, newest first. A missing directory is empty.
pub fn scan_downloads(dir: &Path) -> Vec<LocalFile> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<LocalFile> = rd
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !path.is_file() || !is_playable_audio_path(&path) {
                return None;
            }
            let meta = entry.metadata().ok()?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            Some(LocalFile {
                path,
                name,
                size_bytes: meta.len(),
                modified: meta.modified().ok(),
            })
        })
        .collect();

    files.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.name.cmp(&b.name))
    });
    files
}

fn is_playable_audio_path(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());
    matches!(
        ext.as_deref(),
        Some("mp3" | "flac" | "ogg" | "opus" | "m4a" | "aac" | "wav" | "webm" | "mp4")
    )
}

fn fmt_size(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    if bytes as f64 >= MB {
        format!("{:.1} MB", bytes as f64 / MB)
    } else {
        format!("{} KB", bytes.div_ceil(1024))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{key, state_with};

    #[test]
    fn scan_keeps_audio_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("A.FLAC"), b"xy").unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.mp3")).unwrap();

        let mut names: Vec<String> = scan_downloads(dir.path())
            .into_iter()
            .map(|f| f.name)
            .collect();
        names.sort();
        assert_eq!(names, ["A.FLAC", "b.mp3"]);
        assert!(scan_downloads(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn enter_plays_local_song() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Late Set.opus"), b"x").unwrap();
        let mut state = state_with(0, 0);
        state.downloads = scan_downloads(dir.path());

        let mut downloads = Downloads::new();
        downloads.handle_key(key(KeyCode::Down), &state);
        let actions = downloads.handle_key(key(KeyCode::Enter), &state);
        let [Action::PlaySong(song)] = &actions[..] else {
            panic!("expected PlaySong, got {actions:?}");
        };
        assert_eq!(song.title, "Late Set");
        assert_eq!(song.local_path(), Some(dir.path().join("Late Set.opus")));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(fmt_size(1), "1 KB");
        assert_eq!(fmt_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
