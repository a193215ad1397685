use crate::layout::{LayoutLine, LayoutMode, layout_song};
use crate::types::song::Song;
use std::fmt;

/// A layout line as two monospace text rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub chords: String,
    pub lyrics: String,
}

impl RenderedLine {
    pub fn has_chords(&self) -> bool {
        !self.chords.trim().is_empty()
    }
}

fn pad_to(row: &mut String, width: usize) {
    let len = row.chars().count();
    if len < width {
        row.extend(std::iter::repeat_n(' ', width - len));
    }
}

fn render_slots(line: &LayoutLine) -> RenderedLine {
    let mut chords = String::new();
    let mut lyrics = String::new();

    for (i, word) in line.words.iter().enumerate() {
        let chord = line.chord_at(word.offset).unwrap_or("");
        let width = word.text.chars().count().max(chord.chars().count());
        if i > 0 {
            chords.push(' ');
            lyrics.push(' ');
        }
        let cell_start = lyrics.chars().count();
        chords.push_str(chord);
        lyrics.push_str(&word.text);
        pad_to(&mut chords, cell_start + width);
        pad_to(&mut lyrics, cell_start + width);
    }

    RenderedLine {
        chords: chords.trim_end().to_string(),
        lyrics: lyrics.trim_end().to_string(),
    }
}

fn render_columns(line: &LayoutLine) -> RenderedLine {
    let mut chords = String::new();
    for chord in &line.chords {
        let len = chords.chars().count();
        if len > 0 && len >= chord.offset {
            // previous chord runs into this column, keep them apart
            chords.push(' ');
        } else {
            pad_to(&mut chords, chord.offset);
        }
        chords.push_str(&chord.text);
    }

    let lyrics = line
        .words
        .iter()
        .map(|word| word.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    RenderedLine { chords, lyrics }
}

pub fn render_line(line: &LayoutLine) -> RenderedLine {
    match line.mode {
        LayoutMode::SlotAligned => render_slots(line),
        LayoutMode::CharacterOffset => render_columns(line),
    }
}

/// Plain-text chord sheet: heading, blank line, then chords over lyrics.
pub struct SheetFormatter<'a> {
    song: &'a Song,
    steps: i32,
    mode: LayoutMode,
}

impl<'a> SheetFormatter<'a> {
    pub fn new(song: &'a Song, steps: i32, mode: LayoutMode) -> Self {
        Self { song, steps, mode }
    }
}

impl fmt::Display for SheetFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.song.heading())?;
        writeln!(f)?;
        for line in layout_song(self.song, self.steps, self.mode) {
            let rendered = render_line(&line);
            if rendered.has_chords() {
                writeln!(f, "{}", rendered.chords)?;
            }
            writeln!(f, "{}", rendered.lyrics)?;
        }
        Ok(())
    }
}

pub fn render_song(song: &Song, steps: i32, mode: LayoutMode) -> String {
    SheetFormatter::new(song, steps, mode).to_string()
}
