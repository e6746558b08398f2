//! Application error types for decode, push and the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigLoadError;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    /// Inbound request URL is not an absolute request URI.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Push endpoint answered with anything but 200.
    #[error("Status code: {0}")]
    PushStatus(u16),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::MalformedUrl(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Malformed URL: {}", msg),
            ),
            AppError::Transport(e) => (StatusCode::BAD_GATEWAY, format!("Transport error: {}", e)),
            AppError::PushStatus(code) => (
                StatusCode::BAD_GATEWAY,
                format!("Push rejected with status code {}", code),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_status_message_carries_code() {
        assert_eq!(AppError::PushStatus(503).to_string(), "Status code: 503");
    }

    #[test]
    fn malformed_url_maps_to_bad_request() {
        let res = AppError::MalformedUrl("relative URL without a base".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn push_failures_map_to_bad_gateway() {
        assert_eq!(
            AppError::PushStatus(500).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn config_load_error_converts() {
        let err = AppError::from(ConfigLoadError::InvalidPushEndpoint);
        assert_eq!(err.to_string(), "Configuration error: Invalid PUSH_ENDPOINT");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
