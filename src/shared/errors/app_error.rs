use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Whether a failed operation may succeed if tried again.
    ///
    /// Cancellations are deliberately non-retryable: a superseded request
    /// must die quietly instead of racing the query that replaced it.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkError(_) | AppError::RateLimited(_)
        )
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::Cancelled(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::NetworkError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::NetworkError("Failed to connect to catalog service".to_string())
        } else if err.is_decode() {
            AppError::ParseError(format!("Malformed catalog response: {}", err))
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimited("Too many requests".to_string()),
                404 => AppError::NotFound("Catalog resource not found".to_string()),
                _ => AppError::NetworkError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::ParseError(format!("Invalid date/time: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ParseError(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
