use super::DrawTarget;
use std::collections::BTreeMap;
use std::fmt;

const FORM_FEED: char = '\u{c}';

/// Plain-text page sink. Coordinates are snapped to a character grid and
/// pages are separated by form feeds.
#[derive(Debug, Clone)]
pub struct TextDocument {
    row_height: f64,
    column_width: f64,
    pages: Vec<BTreeMap<usize, String>>,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocument {
    pub fn new() -> Self {
        Self::with_grid(5.0, 5.0)
    }

    pub fn with_grid(row_height: f64, column_width: f64) -> Self {
        Self {
            row_height,
            column_width,
            pages: vec![BTreeMap::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn cell(value: f64, unit: f64) -> usize {
        if unit <= 0.0 {
            return 0;
        }
        (value / unit).round().max(0.0) as usize
    }
}

impl DrawTarget for TextDocument {
    fn add_page(&mut self) {
        self.pages.push(BTreeMap::new());
    }

    fn text(&mut self, text: &str, x: f64, y: f64, _font_size: f64) {
        let row = Self::cell(y, self.row_height);
        let column = Self::cell(x, self.column_width);
        let Some(page) = self.pages.last_mut() else {
            return;
        };

        let line = page.entry(row).or_default();
        let len = line.chars().count();
        if len > column {
            line.push(' ');
        } else {
            line.extend(std::iter::repeat_n(' ', column - len));
        }
        line.push_str(text);
    }
}

impl fmt::Display for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FORM_FEED)?;
            }
            let last_row = page.keys().next_back().copied().unwrap_or(0);
            for row in 0..=last_row {
                match page.get(&row) {
                    Some(line) => writeln!(f, "{}", line.trim_end())?,
                    None => writeln!(f)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportOptions, export, replay};
    use crate::types::song::Song;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grid_placement() {
        let mut document = TextDocument::with_grid(10.0, 10.0);
        document.text("b", 20.0, 10.0, 12.0);
        document.text("a", 0.0, 0.0, 12.0);
        document.text("c", 10.0, 10.0, 12.0);
        assert_eq!(document.to_string(), "a\n  b c\n");
    }

    #[test]
    fn test_export_to_text() {
        let mut song = Song::new("Amazing Grace").with_key("G");
        song.push_line(&["Amazing", "grace"], &[Some("G"), Some("C")]);
        song.push_line(&["how", "sweet"], &[None, None]);
        song.push_line(&["the", "sound"], &[Some("G"), None]);

        let options = ExportOptions {
            page_height: 60.0,
            ..ExportOptions::default()
        };
        let document = export(&song, 0, &options);
        assert_eq!(document.filename, "amazing_grace.txt");
        assert_eq!(document.page_count(), 2);

        let expected = "\n\n\n\n    Amazing Grace\n\n    Key: G\n\n    G  C\n    Amazing grace\n\n    how sweet\n\u{c}\n\n\n\n    G\n    the sound\n";
        assert_eq!(document.to_text(), expected);
    }

    #[test]
    fn test_replay_counts_pages() {
        let mut song = Song::new("Pages");
        for _ in 0..40 {
            song.push_line(&["word"], &[Some("A")]);
        }
        let document = export(&song, 0, &ExportOptions::default());
        let mut text = TextDocument::new();
        replay(&document.commands, &mut text);
        assert_eq!(text.page_count(), document.page_count());
    }
}
