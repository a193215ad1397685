//! Chord placement above lyric words.
//!
//! Two strategies are available. [`LayoutMode::SlotAligned`] pairs chord `i`
//! with word `i` and leaves column math to the renderer.
//! [`LayoutMode::CharacterOffset`] joins the words with single spaces and
//! places each chord at the character column where its word starts.

use crate::types::chord::transpose_chord;
use crate::types::song::{Line, Song};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    SlotAligned,
    CharacterOffset,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::SlotAligned => write!(f, "slots"),
            LayoutMode::CharacterOffset => write!(f, "columns"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "slots" | "slot" | "slot_aligned" => Ok(LayoutMode::SlotAligned),
            "columns" | "column" | "character_offset" => Ok(LayoutMode::CharacterOffset),
            _ => anyhow::bail!("Unknown layout mode: {}", s),
        }
    }
}

/// Fixed-width text measure used to turn a character column into a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub char_width: f64,
}

impl LayoutMetrics {
    /// Approximate advance of one glyph at `font_size`.
    pub fn for_font_size(font_size: f64) -> Self {
        Self {
            char_width: font_size * CHAR_WIDTH_FACTOR,
        }
    }
}

const CHAR_WIDTH_FACTOR: f64 = 0.6;
const DEFAULT_FONT_SIZE: f64 = 16.0;

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::for_font_size(DEFAULT_FONT_SIZE)
    }
}

/// A piece of text at a horizontal position. `offset` is a slot index in
/// slot-aligned layouts and a character column in character-offset layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub text: String,
    pub offset: usize,
}

impl Placement {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    pub fn x(&self, metrics: &LayoutMetrics) -> f64 {
        self.offset as f64 * metrics.char_width
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutLine {
    pub mode: LayoutMode,
    pub words: Vec<Placement>,
    pub chords: Vec<Placement>,
}

impl LayoutLine {
    /// Chord placed over slot or column `offset`, if any.
    pub fn chord_at(&self, offset: usize) -> Option<&str> {
        self.chords
            .iter()
            .find(|chord| chord.offset == offset)
            .map(|chord| chord.text.as_str())
    }
}

pub fn layout_line(line: &Line, steps: i32, mode: LayoutMode) -> LayoutLine {
    let mut words = Vec::with_capacity(line.lyrics.len());
    let mut chords = Vec::new();
    let mut column = 0;

    for (slot, (word, chord)) in line.slots().enumerate() {
        let offset = match mode {
            LayoutMode::SlotAligned => slot,
            LayoutMode::CharacterOffset => column,
        };
        words.push(Placement::new(word, offset));
        if let Some(chord) = chord {
            chords.push(Placement::new(transpose_chord(chord, steps), offset));
        }
        // one separating space after every word
        column += word.chars().count() + 1;
    }

    LayoutLine {
        mode,
        words,
        chords,
    }
}

pub fn layout_song(song: &Song, steps: i32, mode: LayoutMode) -> Vec<LayoutLine> {
    song.lines
        .iter()
        .map(|line| layout_line(line, steps, mode))
        .collect()
}
