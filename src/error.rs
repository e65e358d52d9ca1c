/// Error types for Meet Insights
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM service error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// HTTP status reported to API clients
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    ///
    /// Messages we author ourselves are passed through verbatim; wrapped
    /// library errors keep their prefix so the source is recognisable.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Llm(msg)
            | AppError::Config(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidInput(msg)
            | AppError::Other(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        let body = Json(serde_json::json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}
