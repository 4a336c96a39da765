//! In-memory chunk source
//!
//! Serves byte ranges out of an owned buffer. Used to scan content that is
//! already in memory and to drive the scanner in tests and benchmarks without
//! touching the filesystem.

use crate::error::{LogrevError, Result};
use crate::file_handler::accessor::ChunkSource;
use async_trait::async_trait;

/// Chunk source backed by an owned byte buffer
#[derive(Debug, Clone, Default)]
pub struct InMemoryChunkSource {
    /// Content served to the scan (source of truth)
    content: Vec<u8>,
}

impl InMemoryChunkSource {
    /// Create a new in-memory source over `content`
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[async_trait]
impl ChunkSource for InMemoryChunkSource {
    async fn read_chunk(&mut self, start: u64, length: usize) -> Result<Vec<u8>> {
        let start = usize::try_from(start).map_err(|_| out_of_range())?;
        let end = start.checked_add(length).ok_or_else(out_of_range)?;

        self.content
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(out_of_range)
    }

    fn file_size(&self) -> u64 {
        self.content.len() as u64
    }
}

fn out_of_range() -> LogrevError {
    LogrevError::chunk_read(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "Requested range is outside the buffer",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_ranges() {
        let mut source = InMemoryChunkSource::new("alpha\nbeta\n");

        assert_eq!(source.file_size(), 11);
        assert_eq!(source.read_chunk(6, 4).await.unwrap(), b"beta");
        assert_eq!(source.read_chunk(0, 0).await.unwrap(), b"");
    }

    #[tokio::test]
    async fn test_in_memory_out_of_range() {
        let mut source = InMemoryChunkSource::new("abc");

        let result = source.read_chunk(2, 5).await;
        assert!(matches!(result, Err(LogrevError::ChunkRead { .. })));

        let result = source.read_chunk(u64::MAX, 1).await;
        assert!(matches!(result, Err(LogrevError::ChunkRead { .. })));
    }
}
