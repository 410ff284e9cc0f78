/*!
 * Error types for the vtt2srt converter.
 *
 * Only failures that stop a whole conversion live here. Malformed cues are
 * absorbed by the parser and formatter and never surface as errors.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the conversion of a single file
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The first line of the input is not a `WEBVTT` marker
    #[error("input file is not a valid VTT file: {}", .0.display())]
    InvalidFormat(PathBuf),

    /// The input file does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The directory that should receive the output does not exist
    #[error("output path not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    /// The input could not be opened or read, or the output could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Whether the error comes from the input content rather than the filesystem
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }
}
