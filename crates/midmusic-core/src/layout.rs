//! View models for the two home-feed sections.
//!
//! Both renderers are pure functions of `(songs, active track id)`; this module
//! holds the bucketing they share so it can be tested without a terminal.

use crate::song::Song;

/// Rows per Trending column.
pub const TRENDING_ROWS: usize = 4;

// ── Quick Picks ───────────────────────────────────────────────────────────────

/// Two vertically stacked songs sharing one horizontal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPickColumn<'a> {
    pub top: &'a Song,
    pub bottom: Option<&'a Song>,
}

impl QuickPickColumn<'_> {
    pub fn key(&self) -> String {
        format!(
            "{}-{}",
            self.top.id,
            self.bottom.map_or("none", |s| s.id.as_str())
        )
    }

    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        std::iter::once(self.top).chain(self.bottom)
    }
}

/// Split `songs` into a top row (first half) and a bottom row (second half),
/// paired by index. With an odd count the last column has no bottom song.
pub fn quick_pick_columns(songs: &[Song]) -> Vec<QuickPickColumn<'_>> {
    let mid = songs.len().div_ceil(2);
    let (top, bottom) = songs.split_at(mid);
    top.iter()
        .enumerate()
        .map(|(idx, top)| QuickPickColumn {
            top,
            bottom: bottom.get(idx),
        })
        .collect()
}

// ── Trending ──────────────────────────────────────────────────────────────────

/// A song with its 1-based position in the whole Trending list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedSong<'a> {
    pub rank: usize,
    pub song: &'a Song,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingColumn<'a> {
    pub entries: Vec<RankedSong<'a>>,
}

impl TrendingColumn<'_> {
    pub fn key(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.song.id.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Consecutive groups of [`TRENDING_ROWS`] songs, original order kept.
pub fn trending_columns(songs: &[Song]) -> Vec<TrendingColumn<'_>> {
    songs
        .chunks(TRENDING_ROWS)
        .enumerate()
        .map(|(col, chunk)| TrendingColumn {
            entries: chunk
                .iter()
                .enumerate()
                .map(|(row, song)| RankedSong {
                    rank: col * TRENDING_ROWS + row + 1,
                    song,
                })
                .collect(),
        })
        .collect()
}

// ── Cards ─────────────────────────────────────────────────────────────────────

/// What a single item renders: the song plus whether it is playing now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongCard<'a> {
    pub song: &'a Song,
    pub now_playing: bool,
}

impl<'a> SongCard<'a> {
    pub fn new(song: &'a Song, active_id: Option<&str>) -> Self {
        Self {
            song,
            now_playing: active_id == Some(song.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song::new(format!("s{i}"), format!("Song {i}"), "A", "u"))
            .collect()
    }

    #[test]
    fn quick_picks_pair_halves() {
        let list = songs(5);
        let cols = quick_pick_columns(&list);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].top.id, "s0");
        assert_eq!(cols[0].bottom.unwrap().id, "s3");
        assert_eq!(cols[1].bottom.unwrap().id, "s4");
        assert_eq!(cols[2].top.id, "s2");
        assert!(cols[2].bottom.is_none());
        assert_eq!(cols[2].key(), "s2-none");
        assert_eq!(cols[0].key(), "s0-s3");
    }

    #[test]
    fn quick_picks_counts() {
        for n in 0..12 {
            let list = songs(n);
            let cols = quick_pick_columns(&list);
            assert_eq!(cols.len(), n.div_ceil(2), "n={n}");
            if n > 0 {
                assert_eq!(cols[0].top.id, "s0");
                assert_eq!(
                    cols[0].bottom.map(|s| s.id.clone()),
                    list.get(n.div_ceil(2)).map(|s| s.id.clone())
                );
                assert_eq!(cols.last().unwrap().bottom.is_none(), n % 2 == 1);
            }
            let total: usize = cols.iter().map(|c| c.songs().count()).sum();
            assert_eq!(total, n);
        }
    }

    #[test]
    fn trending_ranks_are_global() {
        let list = songs(10);
        let cols = trending_columns(&list);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[2].entries.len(), 2);

        let flat: Vec<_> = cols.iter().flat_map(|c| c.entries.iter()).collect();
        for (i, entry) in flat.iter().enumerate() {
            assert_eq!(entry.rank, i + 1);
            assert_eq!(entry.song.id, list[i].id);
        }
        assert_eq!(cols[0].key(), "s0-s1-s2-s3");
    }

    #[test]
    fn empty_input_has_no_columns() {
        assert!(quick_pick_columns(&[]).is_empty());
        assert!(trending_columns(&[]).is_empty());
    }

    #[test]
    fn card_marks_active_track() {
        let song = Song::new("abc", "t", "a", "u");
        assert!(SongCard::new(&song, Some("abc")).now_playing);
        assert!(!SongCard::new(&song, Some("xyz")).now_playing);
        assert!(!SongCard::new(&song, None).now_playing);
    }
}
