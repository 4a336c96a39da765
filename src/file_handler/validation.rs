//! File validation before a scan opens its read handle.
//!
//! The validator answers one question: is there a readable regular file at this
//! path, and how long is it? Every negative answer collapses into
//! `LogrevError::FileInaccessible` so callers cannot probe the filesystem layout
//! through distinct error messages.

use crate::error::{LogrevError, Result};
use std::path::{Path, PathBuf};

/// A path confirmed to name a regular file, with its size at validation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Validate that a path names an accessible regular file
///
/// # Validations Performed
/// - Path exists (symlinks are followed)
/// - Target is a regular file, not a directory or device
///
/// Read permission is confirmed when the handle is opened right after.
/// Empty files are valid and simply produce no lines.
///
/// # Error Cases
/// - `LogrevError::FileInaccessible` for any of the above failing
pub async fn validate_log_file(path: &Path) -> Result<ValidatedFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| LogrevError::file_inaccessible(path))?;

    if !metadata.is_file() {
        return Err(LogrevError::file_inaccessible(path));
    }

    Ok(ValidatedFile {
        path: path.to_path_buf(),
        size: metadata.len(),
    })
}
