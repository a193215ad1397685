use crate::types::chord::transpose_chord;
use crate::types::song::{Line, Song};

fn transpose_line(line: &Line, amount: i32) -> Line {
    Line {
        lyrics: line.lyrics.clone(),
        chords: line
            .chords
            .iter()
            .map(|chord| chord.as_ref().map(|c| transpose_chord(c, amount)))
            .collect(),
    }
}

/// Rewrite every chord and the key by `amount` semitones.
pub fn transform(song: &Song, amount: i32) -> Song {
    if amount == 0 {
        return song.clone();
    }

    Song {
        title: song.title.clone(),
        key: song.key.as_ref().map(|key| transpose_chord(key, amount)),
        lines: song
            .lines
            .iter()
            .map(|line| transpose_line(line, amount))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assert_eq_songs;

    #[test]
    fn test_transpose() {
        let input = r#"{
            "title": "Amazing Grace", "key": "G",
            "lines": [
                { "lyrics": ["Amazing", "grace"], "chords": ["G", null] },
                { "lyrics": ["how", "sweet"], "chords": ["D/F#", "N.C."] }
            ]
        }"#;
        let expected = r#"{
            "title": "Amazing Grace", "key": "F#",
            "lines": [
                { "lyrics": ["Amazing", "grace"], "chords": ["F#", null] },
                { "lyrics": ["how", "sweet"], "chords": ["C#/F#", "N.C."] }
            ]
        }"#;

        assert_eq_songs(input, |song| transform(song, -13), expected);
    }

    #[test]
    fn test_transpose_matches_layout() {
        use crate::layout::{LayoutMode, layout_song};

        let mut song = Song::new("T");
        song.push_line(&["x", "y", "z"], &[Some("Ab"), None, Some("C#m")]);
        for amount in [-7, 3, 11] {
            let baked = layout_song(&transform(&song, amount), 0, LayoutMode::CharacterOffset);
            let live = layout_song(&song, amount, LayoutMode::CharacterOffset);
            assert_eq!(baked, live);
        }
    }
}
