//! HTTP route handlers for the log server.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::request::LogsParams;
use super::response::{ApiError, LogsResponse};
use crate::error::LogrevError;
use crate::scan::ReverseLineScanner;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<ReverseLineScanner>,
}

impl AppState {
    pub fn new(scanner: ReverseLineScanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
        }
    }
}

/// Handle GET /logs
///
/// Each scan runs on its own task so a panic inside it is reported as an
/// unknown error instead of tearing down the connection. A query string that
/// does not deserialize gets the same JSON error body as any invalid query.
pub async fn handle_logs(
    State(state): State<AppState>,
    params: Result<Query<LogsParams>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        let message = rejection.body_text();
        log::debug!("Rejected query string: {:?}", message);
        ApiError::from(LogrevError::invalid_query(message))
    })?;
    let query = params.into_query().map_err(|err| {
        log::debug!("Rejected log query: {}", err);
        ApiError::from(err)
    })?;

    let file_name = query.file_identifier().to_string();
    let scanner = Arc::clone(&state.scanner);
    let outcome = tokio::spawn(async move { scanner.scan(&query).await })
        .await
        .map_err(LogrevError::from)
        .and_then(|result| result);

    match outcome {
        Ok(log_lines) => {
            log::info!("Served {} lines from {:?}", log_lines.len(), file_name);
            Ok(Json(LogsResponse { log_lines }))
        }
        Err(err) => {
            match &err {
                LogrevError::FileInaccessible { .. } => {
                    log::warn!("Log file {:?} unavailable", file_name)
                }
                _ => log::error!("Scan of {:?} failed ({}): {}", file_name, err.kind(), err),
            }
            Err(ApiError::from(err))
        }
    }
}

/// Handle GET /-/healthy
pub async fn handle_healthy() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
