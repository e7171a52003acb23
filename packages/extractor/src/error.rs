//! Error types for the extractor.
//!
//! Every variant except [`ExtractorError::OutputDirectory`] is local to one
//! document: the batch runner records it against the document's path and
//! moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Filename does not split into enough `_`-separated segments.
    #[error("Unexpected filename format: '{filename}'. Expected <id>_<newspaper>_<year>_<month>_<day>_<page>_...")]
    Format { filename: String },

    /// Page element or its `imageFilename` attribute is missing.
    #[error("Missing page metadata in {}: {reason}", .path.display())]
    MissingMetadata { path: PathBuf, reason: String },

    /// Document is not well-formed XML.
    #[error("XML parsing failed for {}: {source}", .path.display())]
    XmlParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Reading an input or writing an output failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a table failed.
    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Table has no header row.
    #[error("Table {} has no header row", .path.display())]
    EmptyTable { path: PathBuf },

    /// Output directory could not be created. Aborts a batch run.
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration value rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an [`ExtractorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    MissingMetadata,
    XmlParse,
    Io,
    Config,
}

impl ExtractorError {
    /// Build an IO error carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a CSV error carrying the offending path.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::MissingMetadata { .. } => ErrorKind::MissingMetadata,
            Self::XmlParse { .. } => ErrorKind::XmlParse,
            Self::Io { .. }
            | Self::Csv { .. }
            | Self::EmptyTable { .. }
            | Self::OutputDirectory { .. } => ErrorKind::Io,
            Self::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
