//! Paginated export: turns a song into positioned text and page breaks.
//!
//! The paginator only decides what goes where. Drawing is done by a
//! [`DrawTarget`]; [`text::TextDocument`] is the built-in one.

pub mod text;

use crate::layout::{LayoutMetrics, LayoutMode, layout_line};
use crate::types::chord::transpose_chord;
use crate::types::song::{Line, Song};
use crate::util::format_coord;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use text::TextDocument;

pub const DOCUMENT_EXTENSION: &str = "txt";

/// Page geometry and type sizes, in document units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub margin_left: f64,
    pub title_y: f64,
    pub title_font_size: f64,
    pub key_y: f64,
    pub key_font_size: f64,
    /// Cursor position for the first line on the first page.
    pub body_top: f64,
    /// Cursor position for the first line after a page break.
    pub page_top: f64,
    /// A line starting below this position goes to the next page.
    pub page_height: f64,
    pub chord_font_size: f64,
    pub chord_row_height: f64,
    pub lyrics_font_size: f64,
    pub lyrics_row_height: f64,
    pub chord_separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin_left: 20.0,
            title_y: 20.0,
            title_font_size: 20.0,
            key_y: 30.0,
            key_font_size: 12.0,
            body_top: 40.0,
            page_top: 20.0,
            page_height: 270.0,
            chord_font_size: 10.0,
            chord_row_height: 5.0,
            lyrics_font_size: 12.0,
            lyrics_row_height: 10.0,
            chord_separator: "  ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    Key,
    Chords,
    Lyrics,
}

impl fmt::Display for TextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextRole::Title => "title",
            TextRole::Key => "key",
            TextRole::Chords => "chords",
            TextRole::Lyrics => "lyrics",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        role: TextRole,
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
    },
    PageBreak,
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Text {
                role,
                text,
                x,
                y,
                font_size,
            } => write!(
                f,
                "text {} x={} y={} size={} {:?}",
                role,
                format_coord(*x),
                format_coord(*y),
                format_coord(*font_size),
                text
            ),
            DrawCommand::PageBreak => write!(f, "page"),
        }
    }
}

/// Backend that draws positioned text onto pages.
pub trait DrawTarget {
    fn add_page(&mut self);
    fn text(&mut self, text: &str, x: f64, y: f64, font_size: f64);
}

pub fn replay<T: DrawTarget + ?Sized>(commands: &[DrawCommand], target: &mut T) {
    for command in commands {
        match command {
            DrawCommand::Text {
                text,
                x,
                y,
                font_size,
                ..
            } => target.text(text, *x, *y, *font_size),
            DrawCommand::PageBreak => target.add_page(),
        }
    }
}

/// Chord row for export: one entry per word, separated by a fixed gap.
/// Absent chords leave an empty entry so the gaps still line up with slots.
pub fn chord_row(line: &Line, steps: i32, separator: &str) -> String {
    line.slots()
        .map(|(_, chord)| chord.map(|c| transpose_chord(c, steps)).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(separator)
}

/// How the paginator draws a line's chords.
#[derive(Debug, Clone, Copy)]
enum ChordRows {
    /// One text per line, entries joined by the chord separator.
    Joined,
    /// One text per chord at its character column scaled by the metrics.
    Positioned(LayoutMetrics),
}

struct Paginator<'a> {
    options: &'a ExportOptions,
    chord_rows: ChordRows,
    commands: Vec<DrawCommand>,
    cursor: f64,
}

impl<'a> Paginator<'a> {
    fn new(options: &'a ExportOptions, chord_rows: ChordRows) -> Self {
        Self {
            options,
            chord_rows,
            commands: Vec::new(),
            cursor: options.body_top,
        }
    }

    fn text_at(&mut self, role: TextRole, text: String, x: f64, y: f64, font_size: f64) {
        self.commands.push(DrawCommand::Text {
            role,
            text,
            x,
            y,
            font_size,
        });
    }

    fn text(&mut self, role: TextRole, text: String, y: f64, font_size: f64) {
        self.text_at(role, text, self.options.margin_left, y, font_size);
    }

    fn header(&mut self, song: &Song, steps: i32) {
        let options = self.options;
        self.text(
            TextRole::Title,
            song.title.clone(),
            options.title_y,
            options.title_font_size,
        );
        if let Some(key) = song.key() {
            self.text(
                TextRole::Key,
                format!("Key: {}", transpose_chord(key, steps)),
                options.key_y,
                options.key_font_size,
            );
        }
    }

    /// Emit the chord row of `line`; returns whether anything was drawn.
    fn chords(&mut self, line: &Line, steps: i32) -> bool {
        let options = self.options;
        match self.chord_rows {
            ChordRows::Joined => {
                let chords = chord_row(line, steps, &options.chord_separator);
                if chords.trim().is_empty() {
                    return false;
                }
                self.text(TextRole::Chords, chords, self.cursor, options.chord_font_size);
                true
            }
            ChordRows::Positioned(metrics) => {
                let layout = layout_line(line, steps, LayoutMode::CharacterOffset);
                let mut drawn = false;
                for chord in layout.chords {
                    if chord.text.trim().is_empty() {
                        continue;
                    }
                    let x = options.margin_left + chord.x(&metrics);
                    self.text_at(
                        TextRole::Chords,
                        chord.text,
                        x,
                        self.cursor,
                        options.chord_font_size,
                    );
                    drawn = true;
                }
                drawn
            }
        }
    }

    fn line(&mut self, line: &Line, steps: i32) {
        let options = self.options;
        if self.cursor > options.page_height {
            self.commands.push(DrawCommand::PageBreak);
            self.cursor = options.page_top;
        }

        if line.chords.len() > line.lyrics.len() {
            tracing::debug!(
                words = line.lyrics.len(),
                chords = line.chords.len(),
                "chords past the last word are not drawn"
            );
        }

        if self.chords(line, steps) {
            self.cursor += options.chord_row_height;
        }

        self.text(TextRole::Lyrics, line.text(), self.cursor, options.lyrics_font_size);
        self.cursor += options.lyrics_row_height;
    }

    fn run(mut self, song: &Song, steps: i32) -> Vec<DrawCommand> {
        self.header(song, steps);
        for line in &song.lines {
            self.line(line, steps);
        }
        self.commands
    }
}

pub fn paginate_with(song: &Song, steps: i32, options: &ExportOptions) -> Vec<DrawCommand> {
    Paginator::new(options, ChordRows::Joined).run(song, steps)
}

/// Paginate with each chord drawn at its own x position: the character
/// column of its word scaled by `metrics`, offset by the left margin.
pub fn paginate_positioned(
    song: &Song,
    steps: i32,
    metrics: &LayoutMetrics,
    options: &ExportOptions,
) -> Vec<DrawCommand> {
    Paginator::new(options, ChordRows::Positioned(*metrics)).run(song, steps)
}

/// Paginate with default geometry and the given page threshold.
pub fn paginate(song: &Song, steps: i32, page_height: f64) -> Vec<DrawCommand> {
    let options = ExportOptions {
        page_height,
        ..ExportOptions::default()
    };
    paginate_with(song, steps, &options)
}

/// File name for an exported song: non-alphanumerics become `_`, lowercased.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.{}", stem.to_lowercase(), DOCUMENT_EXTENSION)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub filename: String,
    pub commands: Vec<DrawCommand>,
}

impl ExportedDocument {
    pub fn page_count(&self) -> usize {
        1 + self
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::PageBreak))
            .count()
    }

    pub fn to_text(&self) -> String {
        let mut document = TextDocument::new();
        replay(&self.commands, &mut document);
        document.to_string()
    }
}

pub fn export(song: &Song, steps: i32, options: &ExportOptions) -> ExportedDocument {
    let commands = paginate_with(song, steps, options);
    tracing::debug!(
        title = %song.title,
        steps,
        commands = commands.len(),
        "paginated song"
    );
    ExportedDocument {
        filename: export_filename(&song.title),
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_song(lines: usize) -> Song {
        let mut song = Song::new("Long Song");
        for _ in 0..lines {
            song.push_line(&["la", "la"], &[Some("C"), None]);
        }
        song
    }

    fn page_breaks(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PageBreak))
            .count()
    }

    fn text_of(command: &DrawCommand) -> (&TextRole, &str, f64) {
        match command {
            DrawCommand::Text { role, text, y, .. } => (role, text.as_str(), *y),
            DrawCommand::PageBreak => panic!("expected text, got page break"),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut song = Song::new("Amazing Grace").with_key("Bb");
        song.push_line(&["Amazing", "grace"], &[Some("Bb"), None]);
        song.push_line(&["how", "sweet"], &[None, None]);

        let commands = paginate(&song, 2, 270.0);
        let texts: Vec<_> = commands.iter().map(text_of).collect();
        assert_eq!(
            texts,
            vec![
                (&TextRole::Title, "Amazing Grace", 20.0),
                (&TextRole::Key, "Key: C", 30.0),
                (&TextRole::Chords, "C  ", 40.0),
                (&TextRole::Lyrics, "Amazing grace", 45.0),
                (&TextRole::Lyrics, "how sweet", 55.0),
            ]
        );
    }

    #[test]
    fn test_no_key_line_without_key() {
        let commands = paginate(&Song::new("Untitled"), 0, 270.0);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_chord_row_keeps_slots() {
        let mut song = Song::new("Row");
        song.push_line(&["a", "b", "c"], &[None, Some("Eb"), Some("xyz")]);
        assert_eq!(chord_row(&song.lines[0], 1, "  "), "  E  xyz");
        // blank chord rows are skipped by the paginator
        song.push_line(&["d"], &[Some("")]);
        let commands = paginate(&song, 0, 270.0);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Text { role: TextRole::Lyrics, .. })
        ));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn test_page_breaks_follow_line_height() {
        // each line is a chord row (5) plus a lyrics row (10)
        for (lines, expected) in [(0, 0), (16, 0), (17, 1), (33, 1), (34, 2), (50, 2)] {
            let commands = paginate(&uniform_song(lines), 0, 270.0);
            assert_eq!(page_breaks(&commands), expected, "{} lines", lines);
        }
    }

    #[test]
    fn test_rows_never_split_across_pages() {
        let commands = paginate(&uniform_song(60), 0, 270.0);
        for (i, command) in commands.iter().enumerate() {
            if let DrawCommand::Text {
                role: TextRole::Chords,
                y,
                ..
            } = command
            {
                // the lyrics row always follows its chord row on the same page
                match &commands[i + 1] {
                    DrawCommand::Text {
                        role: TextRole::Lyrics,
                        y: lyrics_y,
                        ..
                    } => assert_eq!(*lyrics_y, y + 5.0),
                    other => panic!("unexpected {:?}", other),
                }
            }
            if *command == DrawCommand::PageBreak {
                assert!(matches!(
                    &commands[i + 1],
                    DrawCommand::Text { role: TextRole::Chords, y, .. } if *y == 20.0
                ));
            }
        }
    }

    #[test]
    fn test_custom_page_height() {
        let options = ExportOptions {
            page_height: 100.0,
            ..ExportOptions::default()
        };
        // first page holds lines at 40..=100, later pages 20..=95
        assert_eq!(export(&uniform_song(11), 0, &options).page_count(), 2);
        assert_eq!(export(&uniform_song(12), 0, &options).page_count(), 3);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Amazing Grace (Live)!"), "amazing_grace__live__.txt");
        assert_eq!(export_filename("Ça va"), "_a_va.txt");
        assert_eq!(export_filename(""), ".txt");
    }

    #[test]
    fn test_command_display() {
        let command = DrawCommand::Text {
            role: TextRole::Chords,
            text: "G  C".to_string(),
            x: 20.0,
            y: 42.5,
            font_size: 10.0,
        };
        assert_eq!(command.to_string(), "text chords x=20.0 y=42.5 size=10.0 \"G  C\"");
        assert_eq!(DrawCommand::PageBreak.to_string(), "page");
    }

    #[test]
    fn test_commands_serialize() {
        let json = serde_json::to_string(&DrawCommand::PageBreak).unwrap();
        assert_eq!(json, r#"{"op":"page_break"}"#);
    }

    #[test]
    fn test_positioned_chords_use_metrics() {
        let mut song = Song::new("Amazing Grace");
        song.push_line(&["Amazing", "grace", "how"], &[Some("G"), None, Some("Bb7")]);
        let metrics = LayoutMetrics { char_width: 6.0 };

        let commands = paginate_positioned(&song, 2, &metrics, &ExportOptions::default());
        assert_eq!(
            commands[1..],
            [
                DrawCommand::Text {
                    role: TextRole::Chords,
                    text: "A".to_string(),
                    x: 20.0,
                    y: 40.0,
                    font_size: 10.0,
                },
                DrawCommand::Text {
                    role: TextRole::Chords,
                    text: "C7".to_string(),
                    // "Amazing grace " is 14 columns
                    x: 20.0 + 14.0 * 6.0,
                    y: 40.0,
                    font_size: 10.0,
                },
                DrawCommand::Text {
                    role: TextRole::Lyrics,
                    text: "Amazing grace how".to_string(),
                    x: 20.0,
                    y: 45.0,
                    font_size: 12.0,
                },
            ]
        );
    }

    #[test]
    fn test_positioned_pages_match_joined() {
        let song = uniform_song(40);
        let options = ExportOptions::default();
        let positioned = paginate_positioned(&song, 0, &LayoutMetrics::default(), &options);
        assert_eq!(page_breaks(&positioned), page_breaks(&paginate_with(&song, 0, &options)));
    }

    #[test]
    fn test_extra_chords_are_not_drawn() {
        let mut song = Song::new("Extras");
        song.push_line(&["one"], &[Some("C"), Some("G"), Some("D")]);
        let texts: Vec<_> = paginate(&song, 0, 270.0)
            .iter()
            .skip(1)
            .map(|c| text_of(c).1.to_string())
            .collect();
        assert_eq!(texts, vec!["C", "one"]);
    }
}
