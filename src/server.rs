//! HTTP request layer.
//!
//! Exposes `GET /logs?fileName=..&keyword=..&limit=..`, returning
//! `{"logLines": [...]}` newest first, or `{"error": "..."}` with a status code
//! chosen by error kind.

pub mod handlers;
pub mod http;
pub mod request;
pub mod response;

pub use handlers::AppState;
pub use http::{router, LogServer};
