//! HTTP handler modules.

pub mod notes;
pub mod summarize;

use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.backend_name(),
    }))
}
