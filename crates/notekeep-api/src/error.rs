//! HTTP error mapping.

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, warn};

/// Message returned for any summarize failure.
pub const SUMMARY_FAILED: &str = "Failed to generate summary";

/// Errors returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Body exceeded the request size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The data service call failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Summarize request could not be processed.
    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<notekeep_core::Error> for ApiError {
    fn from(err: notekeep_core::Error) -> Self {
        use notekeep_core::Error;
        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note {} not found", id)),
            Error::Store(msg) | Error::Request(msg) => ApiError::BadGateway(msg),
            Error::Summarization(msg) => ApiError::Summarization(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Summarization(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg) => {
                warn!(subsystem = "api", status = status.as_u16(), error = %msg, "Request rejected");
                msg
            }
            ApiError::BadGateway(msg) | ApiError::Internal(msg) => {
                error!(subsystem = "api", status = status.as_u16(), error = %msg, "Request failed");
                msg
            }
            ApiError::Summarization(msg) => {
                error!(subsystem = "summary", error = %msg, "Summarization failed");
                SUMMARY_FAILED.to_string()
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
