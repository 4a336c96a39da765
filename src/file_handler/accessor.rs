//! Core chunk access abstraction.
//!
//! This module defines the ChunkSource trait that the reverse scan reads through.
//! A source hands out exact byte ranges by absolute offset, which is all the
//! backward walk needs; it never has to know about lines.

use crate::error::{LogrevError, Result};
use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Random-access byte source used by the chunk reader
///
/// Implementations own their underlying handle. Dropping the source releases
/// it, so a scan that returns early (full result set or error) still cleans up.
#[async_trait]
pub trait ChunkSource: Send {
    /// Read exactly `length` bytes starting at byte offset `start`
    ///
    /// # Arguments
    /// * `start` - Absolute byte offset of the first byte to read
    /// * `length` - Number of bytes to read
    ///
    /// # Returns
    /// * The requested bytes, always exactly `length` long
    ///
    /// # Errors
    /// * `LogrevError::ChunkRead` if the range cannot be read in full
    async fn read_chunk(&mut self, start: u64, length: usize) -> Result<Vec<u8>>;

    /// Get the total size of the source in bytes
    ///
    /// This is the size captured when the source was opened. Bytes appended
    /// afterwards are not part of the scan.
    fn file_size(&self) -> u64;
}

/// File-backed chunk source over an open tokio file handle
#[derive(Debug)]
pub struct FileChunkSource {
    file: File,
    file_size: u64,
    file_path: PathBuf,
}

impl FileChunkSource {
    /// Open a read handle on a validated file
    ///
    /// # Arguments
    /// * `path` - Path to the file to open
    /// * `file_size` - Size reported by the validator; the scan never reads past it
    ///
    /// # Errors
    /// * `LogrevError::FileInaccessible` if the file cannot be opened for reading
    pub async fn open(path: impl AsRef<Path>, file_size: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|_| LogrevError::file_inaccessible(path))?;

        Ok(Self {
            file,
            file_size,
            file_path: path.to_path_buf(),
        })
    }

    /// Get the path this source was opened from
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ChunkSource for FileChunkSource {
    async fn read_chunk(&mut self, start: u64, length: usize) -> Result<Vec<u8>> {
        self.file
            .seek(SeekFrom::Start(start))
            .await
            .map_err(LogrevError::chunk_read)?;

        let mut buffer = vec![0u8; length];
        // A file truncated mid-scan surfaces as UnexpectedEof here.
        self.file
            .read_exact(&mut buffer)
            .await
            .map_err(LogrevError::chunk_read)?;

        Ok(buffer)
    }

    fn file_size(&self) -> u64 {
        self.file_size
    }
}
