//! Integration tests for the `/logs` HTTP API.

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use logrev::server::{router, AppState};
use logrev::ReverseLineScanner;

const ORIGIN: &str = "http://localhost:3001";

const FIXTURE: &str = "\
2024-12-19 04:42:36 ERROR: User logged in successfully.
2024-12-19 04:42:36 EVENT: User session expired.
2024-12-19 04:42:36 INFO: Connection timeout while reaching the server.
2024-12-19 04:42:36 ERROR: File not found on server.
2024-12-19 04:42:36 EVENT: Scheduled task executed successfully.
";

fn setup_test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("Failed to create log directory");
    std::fs::write(dir.path().join("app.log"), FIXTURE).expect("write fixture");

    let state = AppState::new(ReverseLineScanner::new(dir.path()));
    let app = router(state, HeaderValue::from_static(ORIGIN));
    (app, dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_logs_with_keyword_and_limit() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=app.log&keyword=ERROR&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["logLines"],
        serde_json::json!([
            "2024-12-19 04:42:36 ERROR: File not found on server.",
            "2024-12-19 04:42:36 ERROR: User logged in successfully.",
        ])
    );
}

#[tokio::test]
async fn test_logs_default_limit_without_keyword() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=app.log").await;

    assert_eq!(status, StatusCode::OK);
    let lines = json["logLines"].as_array().unwrap();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "2024-12-19 04:42:36 EVENT: Scheduled task executed successfully."
    );
}

#[tokio::test]
async fn test_keyword_is_url_decoded() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=app.log&keyword=session%20expired").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["logLines"],
        serde_json::json!(["2024-12-19 04:42:36 EVENT: User session expired."])
    );
}

#[tokio::test]
async fn test_missing_file_name_is_bad_request() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?keyword=ERROR").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "fileName is required");
}

#[tokio::test]
async fn test_blank_keyword_is_bad_request() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=app.log&keyword=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Keyword must not be empty or contain only whitespace."
    );
}

#[tokio::test]
async fn test_invalid_limit_is_bad_request() {
    let (app, _dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=app.log&limit=zero").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "limit must be a positive integer");
}

#[tokio::test]
async fn test_undecodable_query_string_is_json_bad_request() {
    let (app, _dir) = setup_test_app();

    let request = Request::builder()
        .uri("/logs?fileName=app.log&fileName=other.log")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("duplicate field"), "message: {message}");
}

#[tokio::test]
async fn test_path_traversal_is_bad_request() {
    let (app, _dir) = setup_test_app();

    let (status, _json) = get(app, "/logs?fileName=..%2F..%2Fetc%2Fpasswd").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let (app, dir) = setup_test_app();

    let (status, json) = get(app, "/logs?fileName=nonexistent.log").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let expected = format!(
        "File not found or inaccessible: {}",
        dir.path().join("nonexistent.log").display()
    );
    assert_eq!(json["error"], expected);
}

#[tokio::test]
async fn test_cors_header_on_responses() {
    let (app, _dir) = setup_test_app();

    let request = Request::builder()
        .uri("/logs?fileName=app.log")
        .header(header::ORIGIN, ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ORIGIN
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _dir) = setup_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/logs")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ORIGIN
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, OPTIONS"
    );
}

#[tokio::test]
async fn test_healthy() {
    let (app, _dir) = setup_test_app();

    let request = Request::builder()
        .uri("/-/healthy")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
