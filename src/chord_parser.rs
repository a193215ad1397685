use crate::types::chord::{ChordSymbol, ParsedChord};
use crate::types::pitch::{Accidental, PitchClass};

/// Raw pieces of a chord symbol before the root is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordParts<'a> {
    pub letter: char,
    pub accidental: Option<Accidental>,
    pub suffix: &'a str,
}

impl ChordParts<'_> {
    /// Letter and accidental as written, e.g. `"Bb"`.
    pub fn root_text(&self) -> String {
        let mut root = String::with_capacity(2);
        root.push(self.letter);
        if let Some(accidental) = self.accidental {
            root.push(accidental.as_char());
        }
        root
    }
}

/// Split `letter A-G, optional # or b, remainder`. Returns `None` when the
/// first character is not an uppercase root letter.
pub fn split_chord(symbol: &str) -> Option<ChordParts<'_>> {
    let mut chars = symbol.char_indices();

    let letter = match chars.next() {
        Some((_, c @ 'A'..='G')) => c,
        _ => return None,
    };

    // every char consumed so far is ASCII, so byte offsets are char offsets
    let (accidental, rest_start) = match chars.next() {
        Some((idx, c)) => match Accidental::from_char(c) {
            Some(accidental) => (Some(accidental), idx + 1),
            None => (None, idx),
        },
        None => (None, symbol.len()),
    };

    Some(ChordParts {
        letter,
        accidental,
        suffix: &symbol[rest_start..],
    })
}

pub fn parse_chord(symbol: &str) -> ParsedChord {
    let Some(parts) = split_chord(symbol) else {
        return ParsedChord::Opaque(symbol.to_string());
    };

    match PitchClass::from_root(&parts.root_text()) {
        Some(root) => ParsedChord::Chord(ChordSymbol {
            root,
            spelling: parts.accidental,
            suffix: parts.suffix.to_string(),
        }),
        None => ParsedChord::Opaque(symbol.to_string()),
    }
}
