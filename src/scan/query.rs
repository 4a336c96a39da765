//! Log query model and validation.
//!
//! A [`LogQuery`] can only be built in a valid state: the file identifier is a
//! plain relative path, the keyword (when present) is non-blank and stored
//! trimmed, and the limit is at least one.

use crate::error::{LogrevError, Result};
use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};

/// Number of lines returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(limit) => limit,
    None => panic!("default limit must be non-zero"),
};

/// A validated request for the newest matching lines of one log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    file_identifier: String,
    keyword: Option<String>,
    limit: NonZeroUsize,
}

impl LogQuery {
    /// Build a query, rejecting it before any I/O if it is malformed
    ///
    /// # Arguments
    /// * `file_identifier` - File name relative to the log directory
    /// * `keyword` - Optional substring filter; trimmed before use
    /// * `limit` - Maximum number of lines; `None` means [`DEFAULT_LIMIT`]
    ///
    /// # Errors
    /// * `LogrevError::InvalidQuery` for an empty or escaping identifier,
    ///   a blank keyword, or a zero limit
    pub fn new(
        file_identifier: impl Into<String>,
        keyword: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Self> {
        let file_identifier = file_identifier.into();
        check_file_identifier(&file_identifier)?;

        let keyword = normalize_keyword(keyword)?;

        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(value) => NonZeroUsize::new(value)
                .ok_or_else(|| LogrevError::invalid_query("limit must be a positive integer"))?,
        };

        Ok(Self {
            file_identifier,
            keyword,
            limit,
        })
    }

    pub fn file_identifier(&self) -> &str {
        &self.file_identifier
    }

    /// The trimmed keyword, if the query filters at all
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    /// Join the identifier onto the log directory
    pub fn resolve_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.file_identifier)
    }
}

/// Trim a keyword, rejecting one that is empty or all whitespace
///
/// `None` stays `None` (no filtering). `Some` always comes back trimmed.
pub fn normalize_keyword(keyword: Option<&str>) -> Result<Option<String>> {
    match keyword {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(LogrevError::invalid_query(
                    "Keyword must not be empty or contain only whitespace.",
                ))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

/// Only plain relative names may be joined onto the log directory
fn check_file_identifier(file_identifier: &str) -> Result<()> {
    if file_identifier.is_empty() {
        return Err(LogrevError::invalid_query("fileName is required"));
    }

    let escapes = file_identifier.contains('\0')
        || Path::new(file_identifier)
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));

    if escapes {
        return Err(LogrevError::invalid_query(
            "fileName must be a relative path inside the log directory",
        ));
    }

    Ok(())
}
