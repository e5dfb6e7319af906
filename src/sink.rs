use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::{Result, SinkError};
use crate::point::ControlPointSequence;

/// File name written by [`JsonFileSink::default`], relative to the working
/// directory.
pub const DEFAULT_OUTPUT: &str = "control_points.txt";

const INDENT: &[u8] = b"    ";

/// Destination for generated control points.
pub trait PointSink {
    /// Persists the whole sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the points cannot be written.
    fn write(&mut self, points: &ControlPointSequence) -> Result<()>;
}

/// Writes control points as an indented JSON array of `{x, y, z}` objects,
/// replacing any previous file content.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT)
    }
}

impl PointSink for JsonFileSink {
    fn write(&mut self, points: &ControlPointSequence) -> Result<()> {
        let file = File::create(&self.path).map_err(SinkError::from)?;
        let mut writer = BufWriter::new(file);
        write_json(&mut writer, points)?;
        writer.flush().map_err(SinkError::from)?;
        info!(
            path = %self.path.display(),
            points = points.len(),
            "wrote control points"
        );
        Ok(())
    }
}

/// Serializes `points` in the record format to any writer.
///
/// # Errors
///
/// Returns [`SinkError::Json`] if serialization or the underlying write fails.
pub fn write_json<W: Write>(writer: W, points: &ControlPointSequence) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    points.serialize(&mut ser).map_err(SinkError::from)?;
    Ok(())
}

/// Serializes `points` in the record format.
///
/// # Errors
///
/// Returns [`SinkError::Json`] if serialization fails.
pub fn to_json_string(points: &ControlPointSequence) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, points)?;
    let json = String::from_utf8(buf).map_err(SinkError::from)?;
    Ok(json)
}

/// Parses records written by [`write_json`] back into a sequence.
///
/// # Errors
///
/// Returns [`SinkError::Json`] if the input is not an array of `{x, y, z}`
/// objects whose length is a multiple of four.
pub fn from_json_str(json: &str) -> Result<ControlPointSequence> {
    let points = serde_json::from_str(json).map_err(SinkError::from)?;
    Ok(points)
}
