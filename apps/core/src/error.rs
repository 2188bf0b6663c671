use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The upstream pipeline answered, but not with a usable envelope.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The upstream pipeline answered with a non-success HTTP status.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// Transport-level failures talking to the upstream pipeline.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Represents errors specific to the actor system, such as communication failures.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., missing environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents an error indicating that a rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl AppError {
    /// HTTP status used when this error reaches a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(_) | AppError::UpstreamStatus { .. } | AppError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Actor(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short error kind for response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "InvalidInput",
            AppError::RateLimited => "RateLimited",
            AppError::Timeout(_) => "UpstreamTimeout",
            AppError::Upstream(_) | AppError::UpstreamStatus { .. } | AppError::Http(_) => {
                "ClassificationError"
            }
            AppError::Actor(_) | AppError::Config(_) | AppError::Internal(_) => {
                "InternalServerError"
            }
        }
    }

    /// Extra context for the client: the body the upstream answered with.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::UpstreamStatus { body, .. } if !body.trim().is_empty() => Some(body.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();
        if status.is_server_error() {
            error!(kind = self.kind(), detail = ?detail, "Request failed: {}", self);
        }

        // Internal details stay in the logs
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "An unexpected error occurred".to_string(),
            _ => self.to_string(),
        };
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message,
            detail,
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("Upstream request timed out: {}", err))
        } else if err.is_decode() {
            AppError::Upstream(format!("Invalid upstream response: {}", err))
        } else {
            AppError::Http(err.to_string())
        }
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for AppError {
    fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
        AppError::Actor(format!("Actor mailbox closed: {}", err))
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for AppError {
    fn from(err: tokio::sync::oneshot::error::RecvError) -> Self {
        AppError::Actor(format!("Actor dropped the request: {}", err))
    }
}
