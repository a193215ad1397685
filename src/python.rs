//! Python bindings for the chordsheet library using PyO3

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::SongError;
use crate::export::{ExportOptions, export as rust_export, export_filename as rust_export_filename};
use crate::layout::LayoutMode;
use crate::parser::parse_song;
use crate::render::render_song;
use crate::types::chord::transpose_chord;
use crate::types::song::Song as RustSong;

pyo3::create_exception!(chordsheet, ParseError, PyValueError);

fn to_py_err(e: SongError) -> PyErr {
    match e {
        SongError::Io { .. } => PyIOError::new_err(e.to_string()),
        _ => ParseError::new_err(e.to_string()),
    }
}

fn parse_mode(mode: &str) -> PyResult<LayoutMode> {
    mode.parse()
        .map_err(|e: anyhow::Error| PyValueError::new_err(e.to_string()))
}

/// Song with chord-annotated lyric lines
#[pyclass(name = "Song")]
#[derive(Clone)]
pub struct PySong {
    inner: RustSong,
}

#[pymethods]
impl PySong {
    #[staticmethod]
    fn parse(content: &str) -> PyResult<Self> {
        parse_song(content)
            .map(|inner| PySong { inner })
            .map_err(to_py_err)
    }

    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        crate::file::read_song_file(path)
            .map(|inner| PySong { inner })
            .map_err(to_py_err)
    }

    #[getter]
    fn title(&self) -> String {
        self.inner.title.clone()
    }

    #[getter]
    fn key(&self) -> Option<String> {
        self.inner.key().map(|k| k.to_string())
    }

    /// Render as a plain-text chord sheet
    #[pyo3(signature = (transpose=0, layout="slots"))]
    fn render(&self, transpose: i32, layout: &str) -> PyResult<String> {
        Ok(render_song(&self.inner, transpose, parse_mode(layout)?))
    }

    /// Export as a paginated document; returns (filename, text, pages)
    #[pyo3(signature = (transpose=0, page_height=None))]
    fn export(&self, transpose: i32, page_height: Option<f64>) -> (String, String, usize) {
        let mut options = ExportOptions::default();
        if let Some(page_height) = page_height {
            options.page_height = page_height;
        }
        let document = rust_export(&self.inner, transpose, &options);
        let text = document.to_text();
        let pages = document.page_count();
        (document.filename, text, pages)
    }

    fn __len__(&self) -> usize {
        self.inner.lines.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Song(title={:?}, key={:?}, lines={})",
            self.inner.title,
            self.inner.key(),
            self.inner.lines.len()
        )
    }
}

/// Transpose a chord symbol by semitones
///
/// Example:
///     chordsheet.transpose("Bb7", 2)  # "C7"
#[pyfunction]
fn transpose(chord: &str, steps: i32) -> String {
    transpose_chord(chord, steps)
}

/// File name an exported song is saved under
#[pyfunction]
fn export_filename(title: &str) -> String {
    rust_export_filename(title)
}

/// Chord sheet transposition, layout and export
///
/// Example:
///     song = chordsheet.Song.load("amazing_grace.json")
///     print(song.render(transpose=2))
#[pymodule]
fn chordsheet(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySong>()?;
    m.add_function(wrap_pyfunction!(transpose, m)?)?;
    m.add_function(wrap_pyfunction!(export_filename, m)?)?;

    m.add("ParseError", m.py().get_type::<ParseError>())?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
