//! Viewer session: the song on screen plus the user's transpose offset.

use crate::export::{ExportOptions, ExportedDocument, export};
use crate::layout::{LayoutLine, LayoutMode, layout_song};
use crate::types::offset::TransposeOffset;
use crate::types::song::Song;

/// State owned by one open viewer. Handlers recompute the full layout from
/// the song and the current offset on every call.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    song: Song,
    offset: TransposeOffset,
    mode: LayoutMode,
}

impl ViewerSession {
    pub fn open(song: Song, mode: LayoutMode) -> Self {
        tracing::debug!(title = %song.title, %mode, "opening viewer");
        Self {
            song,
            offset: TransposeOffset::zero(),
            mode,
        }
    }

    /// Start from a given offset instead of zero.
    pub fn with_offset(mut self, offset: TransposeOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn offset(&self) -> TransposeOffset {
        self.offset
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn heading(&self) -> String {
        self.song.heading()
    }

    pub fn render(&self) -> Vec<LayoutLine> {
        layout_song(&self.song, self.offset.steps(), self.mode)
    }

    pub fn on_transpose_up(&mut self) -> Vec<LayoutLine> {
        self.offset.increment();
        tracing::debug!(offset = %self.offset, "transpose up");
        self.render()
    }

    pub fn on_transpose_down(&mut self) -> Vec<LayoutLine> {
        self.offset.decrement();
        tracing::debug!(offset = %self.offset, "transpose down");
        self.render()
    }

    pub fn on_layout_change(&mut self, mode: LayoutMode) -> Vec<LayoutLine> {
        self.mode = mode;
        self.render()
    }

    /// Show another song. The transpose offset starts over.
    pub fn on_select(&mut self, song: Song) -> Vec<LayoutLine> {
        tracing::debug!(title = %song.title, "selecting song");
        self.song = song;
        self.offset.reset();
        self.render()
    }

    /// Export with the offset currently on screen.
    pub fn on_export(&self, options: &ExportOptions) -> ExportedDocument {
        export(&self.song, self.offset.steps(), options)
    }
}

/// Export straight from the song list, untransposed.
pub fn export_from_list(song: &Song, options: &ExportOptions) -> ExportedDocument {
    export(song, 0, options)
}
