use crate::error::{Result, SongError};
use crate::parser::{parse_song, parse_song_index};
use crate::types::song::{Song, SongIndexEntry};
use std::path::{Component, Path, PathBuf};

pub const INDEX_FILENAME: &str = "songs.json";
pub const SONGS_DIR: &str = "songs";

/// Read and decode a single song document.
pub fn read_song_file(path: impl AsRef<Path>) -> Result<Song> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SongError::io(e, path))?;
    parse_song(&content).map_err(|e| e.with_path(path))
}

/// A directory holding `songs.json` and a `songs/` folder of song documents.
#[derive(Debug, Clone)]
pub struct SongLibrary {
    root: PathBuf,
}

impl SongLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILENAME)
    }

    pub fn index(&self) -> Result<Vec<SongIndexEntry>> {
        let path = self.index_path();
        tracing::debug!(path = %path.display(), "reading song index");
        let content = std::fs::read_to_string(&path).map_err(|e| SongError::io(e, &path))?;
        parse_song_index(&content).map_err(|e| e.with_path(path))
    }

    /// Path of a song file named by the index. Names that would leave the
    /// songs directory are rejected.
    pub fn song_path(&self, filename: &str) -> Result<PathBuf> {
        let relative = Path::new(filename);
        let is_plain = !filename.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(SongError::InvalidFilename(filename.to_string()));
        }
        Ok(self.root.join(SONGS_DIR).join(relative))
    }

    pub fn load(&self, filename: &str) -> Result<Song> {
        let path = self.song_path(filename)?;
        tracing::debug!(path = %path.display(), "loading song");
        read_song_file(path)
    }

    /// Load the song whose index title matches `title` exactly.
    pub fn load_by_title(&self, title: &str) -> Result<Song> {
        let entry = self
            .index()?
            .into_iter()
            .find(|entry| entry.title == title)
            .ok_or_else(|| SongError::NotFound(title.to_string()))?;
        self.load(&entry.filename)
    }
}
