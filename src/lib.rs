//! chordsheet - chord sheet transposition, layout and export
//!
//! This library reads chord-annotated lyrics, transposes their chords, lays
//! the chords out above the words and paginates the result for export.

pub mod chord_parser;
pub mod config;
pub mod error;
pub mod export;
pub mod file;
pub mod layout;
pub mod parser;
pub mod render;
pub mod session;
pub mod transforms;
pub mod types;
pub mod util;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use config::Config;
pub use error::SongError;
pub use export::{DrawCommand, ExportOptions, ExportedDocument, export, export_filename, paginate};
pub use file::SongLibrary;
pub use layout::{LayoutLine, LayoutMode, Placement, layout_line, layout_song};
pub use parser::{parse_song, parse_song_index};
pub use render::render_song;
pub use session::ViewerSession;
pub use types::chord::{ChordSymbol, ParsedChord, transpose_chord};
pub use types::offset::TransposeOffset;
pub use types::pitch::PitchClass;
pub use types::song::{Line, Song, SongIndexEntry};
