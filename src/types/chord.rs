use crate::chord_parser::parse_chord;
use crate::types::pitch::{Accidental, PitchClass};
use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: PitchClass,
    /// Accidental used in the source text. Flats are already folded into `root`.
    pub spelling: Option<Accidental>,
    /// Quality, extensions, bass note: everything after the root, untouched.
    pub suffix: String,
}

impl ChordSymbol {
    pub fn transpose(&self, steps: i32) -> Self {
        Self {
            root: self.root.transpose(steps),
            spelling: None,
            suffix: self.suffix.clone(),
        }
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)
    }
}

impl FromStr for ChordSymbol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_chord(s) {
            ParsedChord::Chord(chord) => Ok(chord),
            ParsedChord::Opaque(_) => bail!("Invalid chord symbol: {}", s),
        }
    }
}

/// Result of reading chord text: either a recognised chord or text that is
/// carried through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedChord {
    Chord(ChordSymbol),
    Opaque(String),
}

impl ParsedChord {
    pub fn transpose(&self, steps: i32) -> Self {
        match self {
            ParsedChord::Chord(chord) => ParsedChord::Chord(chord.transpose(steps)),
            ParsedChord::Opaque(text) => ParsedChord::Opaque(text.clone()),
        }
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedChord::Chord(chord) => write!(f, "{}", chord),
            ParsedChord::Opaque(text) => write!(f, "{}", text),
        }
    }
}

/// Transpose a chord symbol by `steps` semitones.
///
/// The root is re-spelled with sharps; the suffix is copied verbatim. Text
/// that does not start with a recognised root comes back unchanged.
pub fn transpose_chord(symbol: &str, steps: i32) -> String {
    if symbol.is_empty() {
        return String::new();
    }
    parse_chord(symbol).transpose(steps).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARP_CHORDS: [&str; 10] = [
        "C", "C#m", "D7", "D#dim", "Emaj7", "F#m7b5", "G/B", "G#sus4", "A (add9)", "B13",
    ];

    #[test]
    fn test_transpose_examples() {
        assert_eq!(transpose_chord("C", 2), "D");
        assert_eq!(transpose_chord("Db", 0), "C#");
        assert_eq!(transpose_chord("Bb7", 2), "C7");
        assert_eq!(transpose_chord("Am", -3), "F#m");
        assert_eq!(transpose_chord("B", 1), "C");
        assert_eq!(transpose_chord("G/B", 2), "A/B");
        assert_eq!(transpose_chord("Ebmaj7 (no3)", 1), "Emaj7 (no3)");
    }

    #[test]
    fn test_transpose_opaque() {
        assert_eq!(transpose_chord("xyz", 3), "xyz");
        assert_eq!(transpose_chord("am", 3), "am");
        assert_eq!(transpose_chord("N.C.", 5), "N.C.");
        assert_eq!(transpose_chord("Cb", 1), "Cb");
        assert_eq!(transpose_chord("Fb7", 1), "Fb7");
        assert_eq!(transpose_chord("", 4), "");
    }

    #[test]
    fn test_double_accidental_keeps_second() {
        assert_eq!(transpose_chord("C##", 0), "C##");
        assert_eq!(transpose_chord("C##", 1), "D#");
        assert_eq!(transpose_chord("C##", 2), "D##");
        assert_eq!(transpose_chord("Dbb", 0), "C#b");
    }

    #[test]
    fn test_identity() {
        for chord in SHARP_CHORDS {
            assert_eq!(transpose_chord(chord, 0), chord);
        }
    }

    #[test]
    fn test_invertible() {
        for chord in SHARP_CHORDS {
            for n in -25..=25 {
                assert_eq!(transpose_chord(&transpose_chord(chord, n), -n), chord);
            }
        }
        assert_eq!(transpose_chord(&transpose_chord("Ebm", 5), -5), "D#m");
    }

    #[test]
    fn test_periodic() {
        for chord in SHARP_CHORDS.iter().chain(["Bb7", "Gbm", "xyz"].iter()) {
            for n in -13..=13 {
                assert_eq!(transpose_chord(chord, n), transpose_chord(chord, n + 12));
            }
        }
        assert_eq!(transpose_chord("E", i32::MAX), transpose_chord("E", 7));
        assert_eq!(transpose_chord("E", i32::MIN), transpose_chord("E", 4));
    }

    #[test]
    fn test_chord_symbol_from_str() {
        let chord: ChordSymbol = "Abm7".parse().unwrap();
        assert_eq!(chord.root, PitchClass::GSharp);
        assert_eq!(chord.spelling, Some(Accidental::Flat));
        assert_eq!(chord.suffix, "m7");
        assert_eq!(chord.to_string(), "G#m7");
        assert_eq!(chord.transpose(-1).to_string(), "Gm7");

        assert!("hello".parse::<ChordSymbol>().is_err());
    }
}
