//! Error types and handling infrastructure for logrev.
//!
//! Every failure a scan can produce is folded into one of four kinds before it
//! reaches the caller. The request layer and the CLI translate these kinds into
//! caller-facing responses; the core itself never logs them.
//!
//! ## Design Principles
//!
//! - **Closed set**: callers can match exhaustively on [`LogrevError`]
//! - **No partial results**: a failed scan yields an error, never a truncated list
//! - **Unified file failures**: missing, wrong type and permission problems look
//!   the same from the outside

use std::path::PathBuf;
use thiserror::Error;

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// The main error type for logrev operations.
#[derive(Error, Debug)]
pub enum LogrevError {
    /// The query was rejected before any I/O happened
    #[error("{message}")]
    InvalidQuery { message: String },

    /// The resolved path is missing, not a regular file, or unreadable
    #[error("File not found or inaccessible: {path}")]
    FileInaccessible { path: PathBuf },

    /// An I/O error occurred while reading one block of the file
    #[error("Failed to read a chunk of the log file.")]
    ChunkRead {
        #[source]
        source: std::io::Error,
    },

    /// Anything not covered by the kinds above
    #[error("{message}")]
    Unknown { message: String },
}

/// Standard Result type for logrev operations.
pub type Result<T> = std::result::Result<T, LogrevError>;

impl LogrevError {
    /// Create an InvalidQuery error with a descriptive message
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a FileInaccessible error for the given path
    pub fn file_inaccessible(path: impl Into<PathBuf>) -> Self {
        Self::FileInaccessible { path: path.into() }
    }

    /// Create a ChunkRead error from the underlying I/O failure
    pub fn chunk_read(source: std::io::Error) -> Self {
        Self::ChunkRead { source }
    }

    /// Create an Unknown error, falling back to the generic message when blank
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Unknown {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            }
        } else {
            Self::Unknown { message }
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery { .. } => "invalid_query",
            Self::FileInaccessible { .. } => "file_inaccessible",
            Self::ChunkRead { .. } => "chunk_read",
            Self::Unknown { .. } => "unknown",
        }
    }
}

impl From<tokio::task::JoinError> for LogrevError {
    fn from(err: tokio::task::JoinError) -> Self {
        // Panic payloads are not trusted as caller-facing text.
        if err.is_cancelled() {
            Self::unknown("The scan was cancelled before it completed")
        } else {
            Self::unknown(UNKNOWN_ERROR_MESSAGE)
        }
    }
}
