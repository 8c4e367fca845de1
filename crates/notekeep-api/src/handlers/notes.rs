//! Note CRUD handlers.
//!
//! Handlers are thin: validation and persistence live in the store. Bodies
//! that fail to deserialize are reported as 400s. Clients re-fetch the
//! listing after each mutation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use notekeep_core::{Note, NoteInput};

use crate::{ApiError, AppState};

/// `GET /api/v1/notes`: all notes, newest first.
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.list().await?;
    debug!(
        subsystem = "api",
        op = "list",
        result_count = notes.len(),
        "Listed notes"
    );
    Ok(Json(notes))
}

/// `GET /api/v1/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.store.fetch(id).await?))
}

/// `POST /api/v1/notes`: 201 with the created note.
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let note = state.store.create(body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PUT /api/v1/notes/:id`: overwrite title and content.
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.store.update(id, body).await?))
}

/// `DELETE /api/v1/notes/:id`: 204, also when the note was already gone.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
