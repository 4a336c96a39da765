//! Backward chunk reader
//!
//! Walks a [`ChunkSource`] from its end toward its start in blocks of at most
//! `chunk_size` bytes. The read position only ever decreases, and every byte
//! of the source is handed out exactly once.

use crate::error::Result;
use crate::file_handler::accessor::ChunkSource;
use std::num::NonZeroUsize;

/// Default chunk ceiling: 2 MiB
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(2 * 1024 * 1024) {
    Some(size) => size,
    None => panic!("chunk size must be non-zero"),
};

/// One block of bytes read at `[offset, offset + len)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    offset: u64,
    data: Vec<u8>,
}

impl Chunk {
    /// Byte offset of the first byte of this chunk
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the chunk's bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Reads a source back to front in bounded blocks
#[derive(Debug)]
pub struct ChunkReader<S> {
    source: S,
    /// Exclusive end of the next chunk; starts at the file size
    position: u64,
    /// Effective ceiling, never larger than the file
    chunk_size: u64,
}

impl<S: ChunkSource> ChunkReader<S> {
    /// Create a reader positioned at the end of `source`
    ///
    /// # Arguments
    /// * `source` - Byte source to walk; owned until the reader is dropped
    /// * `chunk_ceiling` - Maximum bytes per chunk
    pub fn new(source: S, chunk_ceiling: NonZeroUsize) -> Self {
        let file_size = source.file_size();
        let chunk_size = (chunk_ceiling.get() as u64).min(file_size);

        Self {
            source,
            position: file_size,
            chunk_size,
        }
    }

    /// Read the next chunk, moving toward the start of the source
    ///
    /// # Returns
    /// * `Some(chunk)` covering `[position - size, position)` where
    ///   `size = min(chunk_size, position)`
    /// * `None` once the start of the source has been reached
    ///
    /// # Errors
    /// * `LogrevError::ChunkRead` if the block cannot be read; the reader
    ///   should not be used afterwards
    pub async fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if self.position == 0 {
            return Ok(None);
        }

        let size_to_read = self.chunk_size.min(self.position);
        let start = self.position - size_to_read;
        self.position = start;

        // size_to_read <= chunk_ceiling, which came from a usize
        let data = self.source.read_chunk(start, size_to_read as usize).await?;

        Ok(Some(Chunk {
            offset: start,
            data,
        }))
    }

    /// Current read position (exclusive end of the next chunk)
    pub fn position(&self) -> u64 {
        self.position
    }

    /// True once every byte of the source has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.position == 0
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }
}
