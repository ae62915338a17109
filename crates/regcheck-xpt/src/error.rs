//! Errors raised while reading transport files.

use std::path::PathBuf;

use thiserror::Error;

/// Why a transport file could not be read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XptError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte stream is not laid out in 80-byte records.
    #[error("invalid XPT file: {0}")]
    Layout(&'static str),

    #[error("expected {expected} header at byte {offset}")]
    UnexpectedSection { expected: &'static str, offset: usize },

    #[error("unreadable {field} at byte {offset}")]
    BadField { field: &'static str, offset: usize },

    #[error("variable {index}: {reason}")]
    BadVariable { index: usize, reason: String },

    #[error("file ends early at byte {offset}")]
    Truncated { offset: usize },
}

pub type Result<T> = std::result::Result<T, XptError>;
