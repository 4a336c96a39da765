//! # logrev - Newest-first log search over large files
//!
//! Returns the most recent lines of a log file that contain a keyword, without
//! reading the file into memory. The file is walked backward in bounded chunks
//! and the scan stops as soon as enough matches have been collected.
//!
//! ## Features
//!
//! - **Bounded memory**: at most one chunk (2 MiB by default) plus the result set
//! - **Early exit**: work is proportional to how far back the matches are
//! - **Boundary-safe**: lines and UTF-8 characters split across chunks are rebuilt
//! - **HTTP service**: `GET /logs` with JSON output and CORS support
//!
//! ## Architecture
//!
//! - [`error`] - Closed set of scan error kinds
//! - [`file_handler`] - Validation, chunk sources and the backward chunk reader
//! - [`scan`] - Line reconstruction, keyword filter, collector and orchestrator
//! - [`config`] - Layered process configuration
//! - [`server`] - HTTP request layer
//!
//! ```no_run
//! use logrev::{LogQuery, ReverseLineScanner};
//!
//! # async fn demo() -> logrev::Result<()> {
//! let scanner = ReverseLineScanner::new("/var/log");
//! let query = LogQuery::new("syslog", Some("ERROR"), Some(20))?;
//! for line in scanner.scan(&query).await? {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod error;
pub mod file_handler;
pub mod scan;

// Outer surfaces
pub mod config;
pub mod server;

// Re-export commonly used types for convenience
pub use error::{LogrevError, Result};

pub use config::Config;
pub use file_handler::{ChunkSource, FileChunkSource, InMemoryChunkSource};
pub use scan::{KeywordFilter, LogQuery, ReverseLineScanner};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
