use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

/// One of the twelve pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    const NAMES: [&'static str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    // flat spellings that have a sharp equivalent in NAMES
    const FLATS: [(&'static str, &'static str); 5] = [
        ("Db", "C#"),
        ("Eb", "D#"),
        ("Gb", "F#"),
        ("Ab", "G#"),
        ("Bb", "A#"),
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Shift by `steps` semitones. Always lands inside the octave, for any sign or magnitude.
    pub fn transpose(self, steps: i32) -> Self {
        let shifted = (self.index() as i64 + steps as i64).rem_euclid(12);
        Self::from_index(shifted as usize)
    }

    /// Look up a one or two character root such as `"F#"` or `"Bb"`.
    pub fn from_root(root: &str) -> Option<Self> {
        let canonical = Self::FLATS
            .iter()
            .find(|(flat, _)| *flat == root)
            .map(|(_, sharp)| *sharp)
            .unwrap_or(root);

        Self::NAMES
            .iter()
            .position(|name| *name == canonical)
            .map(Self::from_index)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::from_root(s.trim()) {
            Some(pitch) => Ok(pitch),
            None => bail!("Invalid pitch class: {}", s),
        }
    }
}

/// Accidental as written in the source symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
