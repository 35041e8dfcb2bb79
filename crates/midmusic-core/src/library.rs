//! Library backup: playlists and favorite tracks as one JSON document.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LibraryError;
use crate::song::Song;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Song>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryData {
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    #[serde(default)]
    pub favorites: Vec<Song>,
}

impl LibraryData {
    pub fn track_count(&self) -> usize {
        self.favorites.len() + self.playlists.iter().map(|p| p.tracks.len()).sum::<usize>()
    }
}

pub struct LibraryStore {
    library_file: PathBuf,
    export_dir: PathBuf,
}

impl LibraryStore {
    pub fn new(library_file: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_file: library_file.into(),
            export_dir: export_dir.into(),
        }
    }

    /// Current library; an absent file is an empty library.
    pub fn load(&self) -> Result<LibraryData, LibraryError> {
        if !self.library_file.exists() {
            return Ok(LibraryData::default());
        }
        read_library(&self.library_file)
    }

    /// Write a timestamped snapshot into the export directory.
    pub fn export(&self, now: DateTime<Local>) -> Result<PathBuf, LibraryError> {
        let data = self.load()?;
        let target = self.export_dir.join(format!(
            "midmusic-library-{}.json",
            now.format("%Y%m%d-%H%M%S")
        ));
        write_library(&target, &data)?;
        info!(
            "library: exported {} tracks to {}",
            data.track_count(),
            target.display()
        );
        Ok(target)
    }

    /// Replace the library with the contents of `source`.
    pub fn import(&self, source: &Path) -> Result<LibraryData, LibraryError> {
        if !source.exists() {
            return Err(LibraryError::NothingToImport(source.to_path_buf()));
        }
        let data = read_library(source)?;
        write_library(&self.library_file, &data)?;
        info!(
            "library: imported {} playlists, {} favorites from {}",
            data.playlists.len(),
            data.favorites.len(),
            source.display()
        );
        Ok(data)
    }
}

fn read_library(path: &Path) -> Result<LibraryData, LibraryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_library(path: &Path, data: &LibraryData) -> Result<(), LibraryError> {
    let io_err = |source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> LibraryData {
        LibraryData {
            playlists: vec![Playlist {
                name: "Late".to_string(),
                tracks: vec![Song::new("a", "A", "x", "u")],
            }],
            favorites: vec![Song::new("b", "B", "y", "u")],
        }
    }

    #[test]
    fn missing_library_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::new(dir.path().join("library.json"), dir.path());
        assert_eq!(store.load().unwrap(), LibraryData::default());
    }

    #[test]
    fn export_writes_timestamped_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("library.json");
        write_library(&lib, &sample()).unwrap();

        let store = LibraryStore::new(&lib, dir.path().join("exports"));
        let when = Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let path = store.export(when).unwrap();

        assert!(path.ends_with("midmusic-library-20261019-083000.json"));
        assert_eq!(read_library(&path).unwrap(), sample());
    }

    #[test]
    fn import_replaces_library() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("backup.json");
        write_library(&src, &sample()).unwrap();

        let store = LibraryStore::new(dir.path().join("data/library.json"), dir.path());
        let imported = store.import(&src).unwrap();
        assert_eq!(imported.track_count(), 2);
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn import_rejects_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::new(dir.path().join("library.json"), dir.path());

        assert!(matches!(
            store.import(&dir.path().join("nope.json")),
            Err(LibraryError::NothingToImport(_))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1,2").unwrap();
        assert!(matches!(store.import(&bad), Err(LibraryError::Invalid(_))));
        assert!(!dir.path().join("library.json").exists());
    }
}
