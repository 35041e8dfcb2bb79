//! The `Song` record and the serialized identity handed to the song menu.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Sentinel artwork URI for items that arrive without a thumbnail.
pub const UNKNOWN_TRACK_IMAGE_URI: &str = "midmusic://artwork/unknown-track";

/// Prefix used for ids of songs backed by a local file.
pub const LOCAL_ID_PREFIX: &str = "file://";

/// One playable track as displayed in the home feed.
///
/// Built once per fetch by the normalizer and never mutated afterwards; all
/// four fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
}

impl Song {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            thumbnail: thumbnail.into(),
        }
    }

    /// A song for a downloaded file; the id carries the path.
    pub fn local(path: &std::path::Path) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        Self {
            id: format!("{}{}", LOCAL_ID_PREFIX, path.display()),
            title,
            artist: "Downloaded".to_string(),
            thumbnail: UNKNOWN_TRACK_IMAGE_URI.to_string(),
        }
    }

    /// The local path when this song refers to a downloaded file.
    pub fn local_path(&self) -> Option<std::path::PathBuf> {
        self.id
            .strip_prefix(LOCAL_ID_PREFIX)
            .map(std::path::PathBuf::from)
    }

    pub fn has_placeholder_artwork(&self) -> bool {
        self.thumbnail == UNKNOWN_TRACK_IMAGE_URI
    }

    /// Serialized `{id, title, artist, thumbnail}` identity for the song menu.
    pub fn to_payload(&self) -> String {
        // A struct of four strings always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode a menu payload produced by [`Song::to_payload`].
    pub fn from_payload(payload: &str) -> Result<Self, PayloadError> {
        #[derive(Deserialize)]
        struct Partial {
            id: Option<String>,
            title: Option<String>,
            artist: Option<String>,
            thumbnail: Option<String>,
        }

        let p: Partial = serde_json::from_str(payload)?;
        Ok(Self {
            id: p.id.ok_or(PayloadError::MissingField("id"))?,
            title: p.title.ok_or(PayloadError::MissingField("title"))?,
            artist: p.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            thumbnail: p
                .thumbnail
                .unwrap_or_else(|| UNKNOWN_TRACK_IMAGE_URI.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_all_four_fields() {
        let song = Song::new("abc", "Title", "Artist", "https://img/1.jpg");
        let value: serde_json::Value = serde_json::from_str(&song.to_payload()).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["title"], "Title");
        assert_eq!(value["artist"], "Artist");
        assert_eq!(value["thumbnail"], "https://img/1.jpg");
    }

    #[test]
    fn payload_without_id_is_rejected() {
        let err = Song::from_payload(r#"{"title":"x"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::MissingField("id")));
    }

    #[test]
    fn local_song_round_trips_its_path() {
        let path = std::path::Path::new("/music/Some Mix.mp3");
        let song = Song::local(path);
        assert_eq!(song.title, "Some Mix");
        assert!(song.has_placeholder_artwork());
        assert_eq!(song.local_path().as_deref(), Some(path));
        assert!(Song::new("abc", "t", "a", "u").local_path().is_none());
    }
}
