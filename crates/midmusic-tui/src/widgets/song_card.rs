//! SongCard rendering: artwork swatch, title, artist, now-playing pulse.
//!
//! ```text
//!   Quick Picks (2 rows)          Trending (3 rows)
//!   ██ Night Drive          ▅     1 ██ Paper Moons that     ⋮
//!   ██ Neon Coast                      wrap onto two lines
//!                                      Hollow Pines         ▅
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use midmusic_core::layout::SongCard;
use midmusic_core::song::Song;

use crate::theme::{
    ARTWORK_SWATCHES, C_ACCENT, C_MUTED, C_PRIMARY, C_RANK, C_SECONDARY, C_SELECTION_BG,
};

pub const QUICK_PICK_CARD_HEIGHT: u16 = 2;
pub const TRENDING_CARD_HEIGHT: u16 = 3;

const PULSE_FRAMES: &[&str] = &["▁", "▃", "▅", "▇", "▅", "▃"];
/// UI ticks per pulse frame.
const PULSE_SLOWDOWN: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardOptions {
    /// 1-based global rank, drawn before the artwork.
    pub rank: Option<usize>,
    pub title_lines: u16,
    pub selected: bool,
    /// Draw the "more" affordance that opens the song menu.
    pub menu_hint: bool,
    pub frame: usize,
}

pub fn render_card(card: &SongCard<'_>, opts: &CardOptions, area: Rect, buf: &mut Buffer) {
    if area.width < 6 || area.height == 0 {
        return;
    }
    let bg = if opts.selected {
        Style::default().bg(C_SELECTION_BG)
    } else {
        Style::default()
    };
    buf.set_style(area, bg);

    let mut x = area.x;
    if let Some(rank) = opts.rank {
        // At least two columns so ranks 1..99 line up; wider ranks are never cut.
        let label = format!("{:>2} ", rank);
        let width = label.len() as u16;
        buf.set_stringn(
            x,
            area.y,
            &label,
            width as usize,
            bg.fg(C_RANK).add_modifier(Modifier::BOLD),
        );
        x += width;
    }

    let art = artwork_color(card.song);
    buf.set_stringn(x, area.y, "██", 2, bg.fg(art));
    if area.height > 1 {
        buf.set_stringn(x, area.y + 1, "██", 2, bg.fg(art));
    }
    x += 3;

    // Right gutter: now-playing pulse and menu affordance.
    let right = area.x + area.width;
    let text_width = right.saturating_sub(x + 2) as usize;
    if text_width == 0 {
        return;
    }

    let title_lines = opts.title_lines.clamp(1, area.height.max(1));
    let title_style = if card.now_playing {
        bg.fg(C_ACCENT).add_modifier(Modifier::BOLD)
    } else if opts.selected {
        bg.fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        bg.fg(C_PRIMARY)
    };
    let lines = wrap_title(&card.song.title, text_width, title_lines as usize);
    for (i, line) in lines.iter().enumerate() {
        buf.set_stringn(x, area.y + i as u16, line, text_width, title_style);
    }

    let artist_row = area.y + title_lines;
    if artist_row < area.y + area.height {
        buf.set_stringn(
            x,
            artist_row,
            truncate(&card.song.artist, text_width),
            text_width,
            bg.fg(C_SECONDARY),
        );
    }

    if opts.menu_hint {
        buf.set_stringn(right - 1, area.y, "⋮", 1, bg.fg(C_MUTED));
    }
    if card.now_playing {
        let pulse = PULSE_FRAMES[(opts.frame / PULSE_SLOWDOWN) % PULSE_FRAMES.len()];
        let row = area.y + area.height.min(2) - 1;
        buf.set_stringn(right - 1, row, pulse, 1, bg.fg(C_ACCENT));
    }
}

/// Stable swatch for a thumbnail; placeholder artwork is drawn muted.
pub fn artwork_color(song: &Song) -> Color {
    if song.has_placeholder_artwork() {
        return C_MUTED;
    }
    let mut hasher = DefaultHasher::new();
    song.thumbnail.hash(&mut hasher);
    ARTWORK_SWATCHES[(hasher.finish() % ARTWORK_SWATCHES.len() as u64) as usize]
}

/// Single-line truncation to `width` display cells, ending in "…" when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Greedy word wrap into at most `max_lines` lines; the last line is
/// truncated when the text does not fit.
pub fn wrap_title(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines <= 1 || text.width() <= width {
        return vec![truncate(text, width)];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut words = text.split_whitespace().peekable();

    while let Some(word) = words.next() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if candidate.width() <= width {
            current = candidate;
            continue;
        }
        if current.is_empty() {
            // A single word wider than the line.
            current = word.to_string();
        }
        if lines.len() + 1 == max_lines {
            let rest: Vec<&str> = std::iter::once(word).chain(words).collect();
            let tail = if current == word {
                current.clone()
            } else {
                format!("{} {}", current, rest.join(" "))
            };
            lines.push(truncate(&tail, width));
            return lines;
        }
        if current == word {
            lines.push(truncate(&current, width));
            current = String::new();
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(truncate(&current, width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Night Drive", 6), "Night…");
        assert_eq!(truncate("夜のドライブ", 5), "夜の…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn wrap_uses_two_lines_then_truncates() {
        assert_eq!(wrap_title("Paper Moons", 20, 2), ["Paper Moons"]);
        assert_eq!(
            wrap_title("Paper Moons over the harbor", 12, 2),
            ["Paper Moons", "over the ha…"]
        );
        assert_eq!(wrap_title("one two", 4, 2), ["one", "two"]);
        assert_eq!(wrap_title("Paper Moons over", 8, 1), ["Paper M…"]);
    }

    #[test]
    fn placeholder_artwork_is_muted() {
        let song = Song::new("a", "t", "a", midmusic_core::song::UNKNOWN_TRACK_IMAGE_URI);
        assert_eq!(artwork_color(&song), C_MUTED);
        let real = Song::new("a", "t", "a", "https://img/1.jpg");
        assert_eq!(artwork_color(&real), artwork_color(&real.clone()));
    }

    #[test]
    fn large_ranks_are_drawn_in_full() {
        let song = Song::new("a", "Title", "Artist", "https://img/1.jpg");
        let card = SongCard::new(&song, None);
        let area = Rect::new(0, 0, 30, 3);
        let row = |buf: &Buffer| -> String {
            (0..area.width).map(|x| buf[(x, 0u16)].symbol()).collect()
        };

        let mut buf = Buffer::empty(area);
        let opts = CardOptions {
            rank: Some(7),
            title_lines: 2,
            ..Default::default()
        };
        render_card(&card, &opts, area, &mut buf);
        assert!(row(&buf).starts_with(" 7 ██"));

        let mut buf = Buffer::empty(area);
        let opts = CardOptions {
            rank: Some(1000),
            title_lines: 2,
            ..Default::default()
        };
        render_card(&card, &opts, area, &mut buf);
        assert!(row(&buf).starts_with("1000 ██"));
    }

    #[test]
    fn now_playing_card_draws_pulse() {
        let song = Song::new("a", "Title", "Artist", "https://img/1.jpg");
        let card = SongCard::new(&song, Some("a"));
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        render_card(
            &card,
            &CardOptions {
                title_lines: 1,
                ..Default::default()
            },
            area,
            &mut buf,
        );
        assert_eq!(buf[(19u16, 1u16)].symbol(), PULSE_FRAMES[0]);
        assert_eq!(buf[(3u16, 0u16)].symbol(), "T");
        assert_eq!(buf[(3u16, 1u16)].symbol(), "A");
    }
}
