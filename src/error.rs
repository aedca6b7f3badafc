//! Error types for the Scolaris client

use serde::Deserialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Network-level failure (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend-reported error: HTTP status plus the message embedded in the
    /// response body, when one was present
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// GraphQL endpoint returned an error list instead of data
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// Client-side precondition failure; blocks submission before any
    /// network call
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let msg = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                parts.push(format!("{}: {}", field, msg));
            }
        }
        parts.sort();
        AppError::Validation(parts.join("; "))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", e))
    }
}

/// Error body shape the backend uses for failed requests
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Best-effort message extraction; backends vary between `message` and
    /// `error` keys
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "title is required"))]
        title: String,
    }

    #[test]
    fn validation_errors_collapse_to_message() {
        let payload = Payload { title: String::new() };
        let err: AppError = payload.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("title is required")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_response_prefers_message_key() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message": "Book not found", "error": "NotFound"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Book not found"));
    }
}
