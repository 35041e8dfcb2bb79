//! Song normalizer: raw feed items → uniform [`Song`] records.
//!
//! Lookup order for each field:
//!
//! ```text
//!   title      title (string) → title.text → "Unknown Title"
//!   artist     artists[0].name → authors[0].name → author.name → "Unknown Artist"
//!   thumbnail  thumbnail.contents[0].url → thumbnail[0].url → placeholder URI
//! ```
//!
//! Items without an id or without a usable title are skipped.

use serde_json::Value;
use tracing::trace;

use crate::feed::Feed;
use crate::song::{Song, UNKNOWN_ARTIST, UNKNOWN_TITLE, UNKNOWN_TRACK_IMAGE_URI};

/// The two home-screen sections and where they come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    QuickPicks,
    Trending,
}

impl SectionKind {
    /// Header title the catalog uses for this section.
    pub fn label(self) -> &'static str {
        match self {
            Self::QuickPicks => "Quick picks",
            Self::Trending => "Trending",
        }
    }

    /// Heading shown above the rendered section.
    pub fn heading(self) -> &'static str {
        match self {
            Self::QuickPicks => "Quick Picks",
            Self::Trending => "Trending",
        }
    }
}

/// Songs of the section titled `label`, in feed order.
///
/// Never fails: a feed without that section yields an empty list.
pub fn normalize_section(feed: &Feed, label: &str) -> Vec<Song> {
    let Some(shelf) = feed.find_carousel(label) else {
        trace!("normalize: no section titled {:?}", label);
        return Vec::new();
    };

    let songs: Vec<Song> = shelf.contents.iter().filter_map(normalize_item).collect();
    trace!(
        "normalize: {:?} kept {}/{} items",
        label,
        songs.len(),
        shelf.contents.len()
    );
    songs
}

/// Normalize a single raw item, or `None` when it must be skipped.
pub fn normalize_item(item: &Value) -> Option<Song> {
    let id = item_id(item)?;
    let title = item_title(item)?;
    Some(Song {
        id,
        title,
        artist: item_artist(item),
        thumbnail: item_thumbnail(item),
    })
}

fn item_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `None` means the item has no usable title at all.
fn item_title(item: &Value) -> Option<String> {
    let title = item.get("title")?;
    match title {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => Some(
            non_empty_str(title.get("text"))
                .unwrap_or(UNKNOWN_TITLE)
                .to_string(),
        ),
        _ => None,
    }
}

fn item_artist(item: &Value) -> String {
    first_name(item.get("artists"))
        .or_else(|| first_name(item.get("authors")))
        .or_else(|| non_empty_str(item.get("author").and_then(|a| a.get("name"))))
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string()
}

fn item_thumbnail(item: &Value) -> String {
    let thumb = item.get("thumbnail");
    first_url(thumb.and_then(|t| t.get("contents")))
        .or_else(|| first_url(thumb))
        .unwrap_or(UNKNOWN_TRACK_IMAGE_URI)
        .to_string()
}

fn first_name(list: Option<&Value>) -> Option<&str> {
    non_empty_str(list?.as_array()?.first()?.get("name"))
}

fn first_url(list: Option<&Value>) -> Option<&str> {
    non_empty_str(list?.as_array()?.first()?.get("url"))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}
