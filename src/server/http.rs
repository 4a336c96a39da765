//! HTTP server implementation for logrev.

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::signal;

use super::handlers::{handle_healthy, handle_logs, AppState};
use crate::config::Config;

/// HTTP server for the log service.
pub struct LogServer {
    config: Config,
}

impl LogServer {
    /// Create a new log server.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the HTTP server until SIGINT or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        let cors_origin = HeaderValue::from_str(&self.config.cors_origin).map_err(|_| {
            anyhow::anyhow!("Invalid CORS origin: {:?}", self.config.cors_origin)
        })?;

        let state = AppState::new(self.config.scanner());
        let app = router(state, cors_origin);

        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!(
            "Log monitoring service running on http://{} (log directory {})",
            addr,
            self.config.log_dir.display()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Build the router with all routes and the CORS layer.
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route("/logs", get(handle_logs))
        .route("/-/healthy", get(handle_healthy))
        .layer(middleware::from_fn_with_state(cors_origin, cors))
        .with_state(state)
}

/// Allow a single configured origin; answer preflight requests directly.
async fn cors(State(origin): State<HeaderValue>, request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(header::VARY, HeaderValue::from_static("origin"));
    response
}

/// Listen for SIGTERM and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => log::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
