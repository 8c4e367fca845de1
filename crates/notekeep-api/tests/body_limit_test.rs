//! Oversized request bodies still get `{ "error": ... }` responses.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use notekeep_api::{parse_allowed_origins, router, AppState};
use notekeep_core::defaults::REQUEST_BODY_LIMIT_BYTES;
use notekeep_db::MemoryNoteStore;

fn test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryNoteStore::new()));
    router(state, parse_allowed_origins(""))
}

async fn post(app: &Router, uri: &str, body: String, with_length: bool) -> (StatusCode, Value) {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if with_length {
        builder = builder.header(header::CONTENT_LENGTH, body.len());
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| panic!("non-JSON body: {:?}", String::from_utf8_lossy(&bytes)));
    (status, value)
}

fn oversized_content() -> String {
    "x".repeat(REQUEST_BODY_LIMIT_BYTES * 2)
}

#[tokio::test]
async fn test_oversized_summarize_is_summary_failure() {
    let app = test_app();
    let body = json!({ "content": oversized_content() }).to_string();

    for with_length in [true, false] {
        let (status, err) = post(&app, "/summarize", body.clone(), with_length).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "content-length: {}", with_length);
        assert_eq!(err, json!({ "error": "Failed to generate summary" }));
    }
}

#[tokio::test]
async fn test_oversized_note_is_413_json() {
    let app = test_app();
    let body = json!({ "title": "big", "content": oversized_content() }).to_string();

    for with_length in [true, false] {
        let (status, err) = post(&app, "/api/v1/notes", body.clone(), with_length).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "content-length: {}", with_length);
        assert!(err["error"].is_string());
    }

    let response = app
        .oneshot(Request::get("/api/v1/notes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!([]));
}

#[tokio::test]
async fn test_body_at_limit_is_accepted() {
    let app = test_app();
    let envelope = json!({ "content": "" }).to_string().len();
    let content = "y".repeat(REQUEST_BODY_LIMIT_BYTES - envelope);
    let body = json!({ "content": content }).to_string();
    assert_eq!(body.len(), REQUEST_BODY_LIMIT_BYTES);

    let (status, value) = post(&app, "/summarize", body, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["summary"], format!("{}...", "y".repeat(100)));
}
