use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use text_completion::CompletionError;
use thiserror::Error;
use tracing::{error, warn};

pub(crate) const INTERNAL_ERROR: &str = "Internal server error";

/// Per-request failure, rendered as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Origin not allowed")]
    OriginNotAllowed,

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::OriginNotAllowed => StatusCode::FORBIDDEN,
            ApiError::Completion(e) => e
                .status()
                .and_then(|status| StatusCode::from_u16(status).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Completion(e) => e.upstream_message().unwrap_or(INTERNAL_ERROR).to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Completion(e) => error!("OpenAI API Error: {}", e),
            other => warn!("Rejected request: {}", other),
        }
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Failure to start serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
