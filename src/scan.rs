//! The reverse-chunked scan.
//!
//! Chunks are read from the end of the file toward its start, stitched back
//! into whole lines, filtered by keyword and collected until the caller's limit
//! is reached.

pub mod collector;
pub mod filter;
pub mod query;
pub mod reconstruct;
pub mod scanner;

pub use collector::ResultCollector;
pub use filter::KeywordFilter;
pub use query::{LogQuery, DEFAULT_LIMIT};
pub use reconstruct::{reconstruct, trim_line, CandidateLines, Leftover, Reconstructed};
pub use scanner::ReverseLineScanner;
