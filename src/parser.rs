use crate::error::Result;
use crate::types::song::{Song, SongIndexEntry};

/// Decode a song document.
pub fn parse_song(content: &str) -> Result<Song> {
    let song: Song = serde_json::from_str(content)?;
    tracing::debug!(title = %song.title, lines = song.lines.len(), "parsed song");
    Ok(song)
}

/// Decode the song index (`songs.json`).
pub fn parse_song_index(content: &str) -> Result<Vec<SongIndexEntry>> {
    let entries: Vec<SongIndexEntry> = serde_json::from_str(content)?;
    tracing::debug!(entries = entries.len(), "parsed song index");
    Ok(entries)
}
