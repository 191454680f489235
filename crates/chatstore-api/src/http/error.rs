//! Application error type mapping to HTTP status codes and the
//! `{"error": "<message>"}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use chatstore_types::error::ChatError;

/// Message returned for every 5xx; store details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors returned by the chat operations.
    Chat(ChatError),
    /// Malformed request detected before reaching the service
    /// (unreadable body, bad query parameter).
    BadRequest(&'static str),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Chat(err @ ChatError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Chat(err @ ChatError::NotFound) => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::Chat(ChatError::Store(detail)) => {
                tracing::error!(error = %detail, "Chat store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
        };

        error_response(status, &message)
    }
}

/// Build a JSON error body with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (
                AppError::Chat(ChatError::Validation("title length must be 1..200".into())),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Chat(ChatError::NotFound), StatusCode::NOT_FOUND),
            (
                AppError::Chat(ChatError::Store("disk I/O error".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::BadRequest("invalid json"), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn error_body_is_json() {
        let response = AppError::Chat(ChatError::NotFound).into_response();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap();
        assert_eq!(content_type, "application/json");
    }
}
