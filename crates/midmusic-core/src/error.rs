use std::path::PathBuf;
use thiserror::Error;

/// Failure while fetching or decoding a catalog feed.
///
/// Every variant is recoverable: the home screen turns it into an empty
/// section plus one user-facing alert.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog returned status {0}")]
    Status(u16),

    #[error("malformed feed: {0}")]
    Malformed(String),

    #[error("failed to read feed fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while exporting or importing library data.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("library IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid library file: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("no library file to import at {0}")]
    NothingToImport(PathBuf),
}

/// A menu payload that does not decode back into a song.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("menu payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("menu payload is missing `{0}`")]
    MissingField(&'static str),
}
