use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::normalizer::RawHandlerResponse;

/// Incoming query from the messaging channel.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ClassifyRequest {
    /// The user's free-text query.
    #[validate(length(min = 1))]
    pub message: String,
    /// Sender identity, used as the rate limiting key and forwarded upstream for history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Opaque caller metadata, forwarded upstream as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ClassifyRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phone_number: None,
            metadata: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// Envelope returned by the upstream classification pipeline.
///
/// Descriptive fields stay as strings: the relay passes them through and only
/// `classification` and `response_data` drive behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Label of the handler that produced `response_data`.
    pub classification: String,
    /// Exam sub-category (`faq`, `pyq_pdf`, ...) or a pipeline marker such as `stop_conversation`.
    #[serde(default)]
    pub sub_classification: Option<String>,
    /// Physics, Chemistry, Mathematics or Biology when detected.
    #[serde(default)]
    pub subject: Option<String>,
    /// English, Hindi or Hinglish.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub original_message: String,
    #[serde(default)]
    pub translated_message: Option<String>,
    #[serde(default)]
    pub confidence_score: f32,
    /// Handler output, absent when no handler ran.
    #[serde(default)]
    pub response_data: Option<RawHandlerResponse>,
    #[serde(default)]
    pub processing_time_ms: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `reachable` or `unreachable`
    pub upstream: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. `InvalidInput`
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}
