use serde::{Deserialize, Serialize};

/// One lyric line with a chord slot per word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    pub lyrics: Vec<String>,
    #[serde(default)]
    pub chords: Vec<Option<String>>,
}

impl Line {
    pub fn new(lyrics: Vec<String>, chords: Vec<Option<String>>) -> Self {
        Self { lyrics, chords }
    }

    /// Chord over word `index`. Missing slots and empty strings read as no chord.
    pub fn chord_at(&self, index: usize) -> Option<&str> {
        self.chords
            .get(index)
            .and_then(|chord| chord.as_deref())
            .filter(|chord| !chord.is_empty())
    }

    pub fn has_chords(&self) -> bool {
        (0..self.lyrics.len()).any(|i| self.chord_at(i).is_some())
    }

    /// Word/chord pairs in source order, one per lyric word.
    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.lyrics
            .iter()
            .enumerate()
            .map(|(i, word)| (word.as_str(), self.chord_at(i)))
    }

    /// Lyric words joined by single spaces.
    pub fn text(&self) -> String {
        self.lyrics.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: None,
            lines: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn push_line(&mut self, lyrics: &[&str], chords: &[Option<&str>]) {
        self.lines.push(Line::new(
            lyrics.iter().map(|w| w.to_string()).collect(),
            chords.iter().map(|c| c.map(str::to_string)).collect(),
        ));
    }

    /// Key as shown in the viewer header; blank keys count as none.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// `Title [Key: K]`, the way the song list and viewer label a song.
    pub fn heading(&self) -> String {
        match self.key() {
            Some(key) => format!("{} [Key: {}]", self.title, key),
            None => self.title.clone(),
        }
    }
}

/// Entry of the song index (`songs.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongIndexEntry {
    pub title: String,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_at() {
        let line = Line::new(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            vec![Some("G".into()), Some(String::new()), None],
        );
        assert_eq!(line.chord_at(0), Some("G"));
        assert_eq!(line.chord_at(1), None);
        assert_eq!(line.chord_at(2), None);
        assert_eq!(line.chord_at(3), None);
        assert_eq!(line.chord_at(99), None);
        assert!(line.has_chords());
        assert_eq!(line.text(), "a b c d");
    }

    #[test]
    fn test_slots_follow_lyrics() {
        let mut song = Song::new("Test");
        song.push_line(&["one", "two"], &[None, Some("Am"), Some("G")]);
        let slots: Vec<_> = song.lines[0].slots().collect();
        assert_eq!(slots, vec![("one", None), ("two", Some("Am"))]);
    }

    #[test]
    fn test_heading() {
        assert_eq!(Song::new("Amazing Grace").heading(), "Amazing Grace");
        assert_eq!(
            Song::new("Amazing Grace").with_key("G").heading(),
            "Amazing Grace [Key: G]"
        );
        assert_eq!(Song::new("X").with_key(" ").heading(), "X");
    }
}
