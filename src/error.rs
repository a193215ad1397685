//! Errors raised while loading song data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SongError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed song data{}: {}", path_suffix(.path), .source)]
    Malformed {
        source: serde_json::Error,
        path: Option<PathBuf>,
    },

    #[error("Invalid song filename: {0}")]
    InvalidFilename(String),

    #[error("Song not found: {0}")]
    NotFound(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

impl SongError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SongError::Io {
            source,
            path: path.into(),
        }
    }

    /// Attach a file path to a parse error that was raised without one.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            SongError::Malformed { source, path: None } => SongError::Malformed {
                source,
                path: Some(path.into()),
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for SongError {
    fn from(source: serde_json::Error) -> Self {
        SongError::Malformed { source, path: None }
    }
}

pub type Result<T> = std::result::Result<T, SongError>;
