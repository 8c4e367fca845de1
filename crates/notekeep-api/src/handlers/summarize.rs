//! Summarize handler.
//!
//! The body is parsed by hand rather than with the `Json` extractor: any
//! malformed payload (not JSON, missing or non-string `content`, wrong
//! content type, over the body limit) must come back as a 500
//! `{ "error": ... }`, not as an extractor rejection.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use tracing::debug;

use notekeep_core::{Error, SummarizeRequest, SummarizeResponse};

use crate::{ApiError, AppState};

/// `POST /summarize`
pub async fn summarize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let body = body.map_err(|e| Error::Summarization(e.body_text()))?;
    let request: SummarizeRequest = serde_json::from_slice(&body)
        .map_err(|e| Error::Summarization(format!("malformed request: {}", e)))?;

    let summary = state.summarizer.summarize(&request.content)?;
    debug!(
        subsystem = "summary",
        op = "summarize",
        summarizer = state.summarizer.name(),
        content_len = request.content.chars().count(),
        "Summary generated"
    );
    Ok(Json(SummarizeResponse { summary }))
}
