//! HTTP response types for the log server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::LogrevError;

/// Body of a successful `GET /logs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsResponse {
    pub log_lines: Vec<String>,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A scan error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub LogrevError);

impl ApiError {
    /// Status code for each error kind.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LogrevError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            LogrevError::FileInaccessible { .. } => StatusCode::NOT_FOUND,
            LogrevError::ChunkRead { .. } | LogrevError::Unknown { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<LogrevError> for ApiError {
    fn from(err: LogrevError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
