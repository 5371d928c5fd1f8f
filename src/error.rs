//! Error types for loading and exporting documents.

use crate::registry::RegionKey;
use thiserror::Error;

/// The input could not be read as markup at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The bytes are not UTF-8 text.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// An export attempt that could not produce a file. Exports are all-or-nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// A section's region was never registered with the session registry.
    #[error("no editor registered for region {0}")]
    UnknownRegion(RegionKey),

    /// No document is loaded and parsed yet.
    #[error("no document is ready to export")]
    NotReady,
}

/// Failures surfaced to the front-end.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The chosen file could not be parsed.
    #[error("could not read file: {0}")]
    Parse(#[from] ParseError),

    /// The current document could not be exported.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
