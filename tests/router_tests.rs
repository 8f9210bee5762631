mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hireflow::notify::ChannelNotifier;
use hireflow::store::MemoryStore;

fn router() -> Router {
    let state = hireflow::build_state(
        common::test_config(),
        Arc::new(MemoryStore::new()),
        Arc::new(ChannelNotifier::log_only()),
        None,
    );
    hireflow::build_app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/workflows")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_content_type_is_bad_request() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn security_headers_are_set() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/presets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
}

#[tokio::test]
async fn invalid_path_id_is_rejected() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/workflows/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
