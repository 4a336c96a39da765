//! Reverse line scanner: the scan lifecycle.
//!
//! A scan moves through `Validating → Scanning → Draining-Leftover → Done`:
//!
//! 1. The query is checked, the path resolved and validated, a handle opened.
//! 2. Chunks are pulled back to front; each one is reconstructed into lines,
//!    filtered, and offered to the collector until it is full or the file
//!    start is reached.
//! 3. If the file start was reached, the final leftover is the file's first
//!    line and gets one last chance.
//!
//! Any error ends the scan with no partial result. The read handle lives inside
//! the chunk reader, so it is released whichever way the scan returns.

use crate::error::Result;
use crate::file_handler::{validate_log_file, ChunkReader, ChunkSource, FileChunkSource};
use crate::file_handler::DEFAULT_CHUNK_SIZE;
use crate::scan::collector::ResultCollector;
use crate::scan::filter::KeywordFilter;
use crate::scan::query::LogQuery;
use crate::scan::reconstruct::{decode_line, reconstruct, Leftover, Reconstructed};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Serves the newest matching lines of files under one log directory
///
/// The scanner holds only immutable settings. Each call owns its own cursor,
/// handle and result set, so one scanner can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct ReverseLineScanner {
    base_dir: PathBuf,
    chunk_size: NonZeroUsize,
}

impl ReverseLineScanner {
    /// Create a scanner rooted at `base_dir` with the default 2 MiB chunk ceiling
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk ceiling
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Run a query against a file under the log directory
    ///
    /// # Returns
    /// * Up to `query.limit()` matching lines, newest first
    ///
    /// # Errors
    /// * `LogrevError::FileInaccessible` if the resolved path is not a readable file
    /// * `LogrevError::ChunkRead` if a block read fails mid-scan
    pub async fn scan(&self, query: &LogQuery) -> Result<Vec<String>> {
        let path = query.resolve_path(&self.base_dir);
        let filter = KeywordFilter::from_normalized(query.keyword());
        self.scan_path(&path, &filter, query.limit()).await
    }

    /// Run a scan against an explicit path, bypassing the log directory
    pub async fn scan_path(
        &self,
        path: &Path,
        filter: &KeywordFilter,
        limit: NonZeroUsize,
    ) -> Result<Vec<String>> {
        let validated = validate_log_file(path).await?;
        let source = FileChunkSource::open(&validated.path, validated.size).await?;
        self.scan_source(source, filter, limit).await
    }

    /// Run a scan over an already open source
    ///
    /// The source is consumed and dropped before this returns.
    pub async fn scan_source<S: ChunkSource>(
        &self,
        source: S,
        filter: &KeywordFilter,
        limit: NonZeroUsize,
    ) -> Result<Vec<String>> {
        let mut reader = ChunkReader::new(source, self.chunk_size);
        let mut collector = ResultCollector::new(limit);
        let mut leftover = Leftover::default();

        while !collector.is_full() {
            let Some(chunk) = reader.next_chunk().await? else {
                // Reached the start of the file: the leftover is a whole line.
                let first_line = decode_line(&leftover.into_bytes());
                if filter.accepts(&first_line) {
                    collector.offer(first_line);
                }
                break;
            };

            let Reconstructed {
                lines,
                leftover: carried,
            } = reconstruct(chunk.into_bytes(), leftover);
            leftover = carried;

            for line in lines {
                if filter.accepts(&line) && !collector.offer(line) {
                    break;
                }
            }
        }

        Ok(collector.into_lines())
    }
}
