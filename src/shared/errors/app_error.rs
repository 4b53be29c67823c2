use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status.as_u16(), &err.to_string())
        } else if err.is_decode() {
            AppError::SerializationError(err.to_string())
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Fetch task failed: {}", err))
    }
}

impl AppError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, detail: &str) -> Self {
        match status {
            429 => AppError::RateLimitError("Too many requests".to_string()),
            404 => AppError::NotFound("External resource not found".to_string()),
            _ => AppError::ApiError(format!("HTTP {}: {}", status, detail)),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
