//! Error types for report writing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing report artifacts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Report file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV export failed.
    #[error("Failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON export failed.
    #[error("Failed to write JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for report writing.
pub type Result<T> = std::result::Result<T, ReportError>;
