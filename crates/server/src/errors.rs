use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use configs::NotFoundMode;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const MESSAGE_NOT_FOUND: &str = "Message not found";

/// Error surfaced by a handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Missing message, with the status chosen by `mode`.
    pub fn message_not_found(mode: NotFoundMode) -> Self {
        let status = match mode {
            NotFoundMode::Compat => StatusCode::OK,
            NotFoundMode::Conventional => StatusCode::NOT_FOUND,
        };
        Self::new(status, MESSAGE_NOT_FOUND)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            other => {
                error!(error = %other, "store operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot open message store: {0}")]
    Store(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_follows_mode() {
        assert_eq!(ApiError::message_not_found(NotFoundMode::Compat).status, StatusCode::OK);
        assert_eq!(ApiError::message_not_found(NotFoundMode::Conventional).status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_errors_become_500() {
        let e: ApiError = ServiceError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.contains("disk full"));
    }
}
