//! File access for the reverse scan.
//!
//! This module provides the byte-level plumbing the scanner reads through:
//! validation of the target path, random-access chunk sources, and the reader
//! that walks a source from its end toward its start.

pub mod accessor;
pub mod chunk_reader;
pub mod in_memory;
pub mod validation;

pub use accessor::{ChunkSource, FileChunkSource};
pub use chunk_reader::{Chunk, ChunkReader, DEFAULT_CHUNK_SIZE};
pub use in_memory::InMemoryChunkSource;
pub use validation::{validate_log_file, ValidatedFile};
