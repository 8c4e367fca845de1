//! Router-level tests for the notes endpoints, backed by the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use async_trait::async_trait;
use uuid::Uuid;

use notekeep_api::{parse_allowed_origins, router, AppState};
use notekeep_core::{Error, Note, NoteInput, NoteStore, Result};
use notekeep_db::MemoryNoteStore;

fn test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryNoteStore::new()));
    router(state, parse_allowed_origins("http://localhost:3000"))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, content: &str) -> Value {
    let (status, note) = send(
        app,
        Method::POST,
        "/api/v1/notes",
        Some(json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    note
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_returns_full_note() {
    let app = test_app();
    let note = create(&app, "Shopping", "Buy milk and eggs").await;

    assert_eq!(note["title"], "Shopping");
    assert_eq!(note["content"], "Buy milk and eggs");
    assert!(note["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    assert!(!note["date"].as_str().unwrap().is_empty());
    assert_eq!(note["created_at_utc"], note["updated_at_utc"]);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = test_app();
    let first = create(&app, "First", "one").await;
    let second = create(&app, "Second", "two").await;

    let (_, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    let ids: Vec<&Value> = body.as_array().unwrap().iter().map(|n| &n["id"]).collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);
}

#[tokio::test]
async fn test_blank_input_rejected_without_change() {
    let app = test_app();
    create(&app, "Keep", "me").await;

    for body in [
        json!({ "title": "   ", "content": "text" }),
        json!({ "title": "Title", "content": "" }),
        json!({ "title": "\t\n", "content": " " }),
    ] {
        let (status, err) = send(&app, Method::POST, "/api/v1/notes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("required"));
    }

    let (_, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let app = test_app();
    let (status, err) = send(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(json!({ "title": "No content" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn test_get_and_update_note() {
    let app = test_app();
    let note = create(&app, "Draft", "v1").await;
    let uri = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, note);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "Final", "content": "v2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], note["id"]);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["content"], "v2");
    assert_eq!(updated["created_at_utc"], note["created_at_utc"]);
}

#[tokio::test]
async fn test_update_with_blank_title_keeps_note() {
    let app = test_app();
    let note = create(&app, "Original", "body").await;
    let uri = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": " ", "content": "changed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["title"], "Original");
    assert_eq!(fetched["content"], "body");
}

#[tokio::test]
async fn test_missing_note_is_404() {
    let app = test_app();
    let uri = format!("/api/v1/notes/{}", Uuid::now_v7());

    let (status, err) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(err["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = test_app();
    let note = create(&app, "Temp", "bye").await;
    let uri = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(body, json!([]));
}

/// Reads succeed from an in-memory copy; every write fails like an
/// unavailable data service.
struct ReadOnlyStore {
    inner: MemoryNoteStore,
}

#[async_trait]
impl NoteStore for ReadOnlyStore {
    fn backend_name(&self) -> &'static str {
        "read-only"
    }

    async fn list(&self) -> Result<Vec<Note>> {
        self.inner.list().await
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        self.inner.fetch(id).await
    }

    async fn create(&self, _input: NoteInput) -> Result<Note> {
        Err(Error::Store("service unavailable (503 Service Unavailable)".to_string()))
    }

    async fn update(&self, _id: Uuid, _input: NoteInput) -> Result<Note> {
        Err(Error::Store("service unavailable (503 Service Unavailable)".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<()> {
        Err(Error::Request("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_failures_are_502_and_leave_listing_unchanged() {
    let inner = MemoryNoteStore::new();
    let existing = inner.create(NoteInput::new("Keep", "me")).await.unwrap();
    let state = AppState::new(Arc::new(ReadOnlyStore { inner }));
    let app = router(state, parse_allowed_origins(""));
    let uri = format!("/api/v1/notes/{}", existing.id);

    let (_, before) = send(&app, Method::GET, "/api/v1/notes", None).await;

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(json!({ "title": "New", "content": "note" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(err["error"].as_str().unwrap().contains("service unavailable"));

    let (status, err) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "Changed", "content": "note" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(err["error"].is_string());

    let (status, err) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(err["error"].is_string());

    let (status, after) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
    assert_eq!(after.as_array().unwrap().len(), 1);
    assert_eq!(after[0]["title"], "Keep");
}
