//! Toast notifications: transient alerts in the top-right corner.
//!
//! Fetch failures, library results and playback errors all surface here
//! instead of modal dialogs. A single spinner toast covers long-running work
//! (library import/export) until it is resolved.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_SURFACE, C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }

    fn color(self) -> ratatui::style::Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Warning => C_TOAST_WARNING,
            Self::Error => C_TOAST_ERROR,
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(4),
            Self::Error => Duration::from_secs(6),
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<(String, usize)>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    /// Identical messages replace each other rather than stacking.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_at(message.into(), severity, Instant::now());
    }

    fn push_at(&mut self, message: String, severity: Severity, now: Instant) {
        self.toasts.retain(|t| t.message != message);
        self.toasts.push_back(Toast {
            message,
            severity,
            expires: now + severity.lifetime(),
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    /// Start or replace the spinner toast; it stays until resolved.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some((message.into(), 0));
    }

    /// Swap the spinner for an ordinary expiring toast.
    pub fn resolve_spinner(&mut self, severity: Severity, message: impl Into<String>) {
        self.spinner = None;
        self.push(message, severity);
    }

    /// Drop expired toasts and advance the spinner. Call each tick.
    pub fn tick(&mut self) {
        self.expire(Instant::now());
        if let Some((_, frame)) = self.spinner.as_mut() {
            *frame = (*frame + 1) % SPINNER_FRAMES.len();
        }
    }

    fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires > now);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Messages currently queued, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }

    pub fn spinner_active(&self) -> bool {
        self.spinner.is_some()
    }

    /// Render toasts in the top-right corner of `area`, newest first.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30.min(area.width), 72);
        let mut y = area.y + 1;

        let spinner = self.spinner.as_ref().map(|(msg, i)| {
            (
                SPINNER_FRAMES[i % SPINNER_FRAMES.len()],
                msg.as_str(),
                C_TOAST_INFO,
            )
        });
        let rest = self
            .toasts
            .iter()
            .rev()
            .take(self.max_visible)
            .map(|t| (t.severity.icon(), t.message.as_str(), t.severity.color()));

        for (icon, message, color) in spinner.into_iter().chain(rest) {
            if y >= area.y + area.height {
                break;
            }
            let w = (message.width() as u16 + 5).min(max_width);
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {} {} ", icon, message),
                    Style::default()
                        .fg(color)
                        .bg(C_SURFACE)
                        .add_modifier(Modifier::BOLD),
                ))),
                toast_area,
            );
            y += 1;
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_collapse() {
        let mut toasts = ToastManager::new();
        toasts.error("boom");
        toasts.error("boom");
        toasts.warning("other");
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn toasts_expire_by_severity() {
        let mut toasts = ToastManager::new();
        let now = Instant::now();
        toasts.push_at("ok".into(), Severity::Success, now);
        toasts.push_at("bad".into(), Severity::Error, now);

        toasts.expire(now + Duration::from_secs(4));
        assert_eq!(toasts.len(), 1);
        toasts.expire(now + Duration::from_secs(7));
        assert!(toasts.is_empty());
    }

    #[test]
    fn spinner_resolves_into_toast() {
        let mut toasts = ToastManager::new();
        toasts.spinner("Exporting library…");
        assert!(!toasts.is_empty());
        assert_eq!(toasts.len(), 0);
        toasts.resolve_spinner(Severity::Success, "done");
        assert_eq!(toasts.len(), 1);
    }
}
