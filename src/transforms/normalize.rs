use crate::types::song::{Line, Song};

/// One chord slot per lyric word: short chord lists are padded with empty
/// slots, extra entries dropped, and blank strings turned into `None`.
fn normalize_line(line: &Line) -> Line {
    if line.chords.len() != line.lyrics.len() {
        tracing::debug!(
            words = line.lyrics.len(),
            chords = line.chords.len(),
            "chord slots do not match lyric words"
        );
    }

    Line {
        lyrics: line.lyrics.clone(),
        chords: (0..line.lyrics.len())
            .map(|i| line.chord_at(i).map(str::to_string))
            .collect(),
    }
}

pub fn transform(song: &Song) -> Song {
    Song {
        title: song.title.clone(),
        key: song.key().map(str::to_string),
        lines: song.lines.iter().map(normalize_line).collect(),
    }
}
