//! Mapping errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use quill_error::{QuillError, QuillErrorKind};
use serde_json::json;
use tracing::error;

/// A failed request.
#[derive(Debug)]
pub enum ApiError {
    /// Generation produced no title
    NotFound(String),
    /// Generation failed
    Generation(QuillError),
}

impl ApiError {
    /// Status code for this error.
    ///
    /// Remote service failures map to 502, everything else on our side to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Generation(e) => match e.kind() {
                QuillErrorKind::Remote(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<QuillError> for ApiError {
    fn from(e: QuillError) -> Self {
        ApiError::Generation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound(topic) => json!({
                "error": "not_found",
                "topic": topic,
            }),
            ApiError::Generation(e) => {
                error!(error = %e, status = status.as_u16(), "Generation failed");
                let code = if status == StatusCode::BAD_GATEWAY {
                    "upstream"
                } else {
                    "internal"
                };
                json!({
                    "error": code,
                    "message": e.kind().to_string(),
                })
            }
        };
        (status, Json(body)).into_response()
    }
}
