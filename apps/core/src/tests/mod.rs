//! Test Module
//!
//! Cross-module test suite for the relay.
//!
//! ## Test Categories
//! - `normalizer_tests`: per-label extraction, error path, exam ordering
//! - `relay_tests`: relay actor gating and normalization over a mock pipeline
//! - `api_tests`: HTTP routes end to end through the router

mod normalizer_tests;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{sleep, Duration};

use crate::actors::traits::ClassificationPipeline;
use crate::error::AppError;
use crate::models::{ClassificationResponse, ClassifyRequest};

// ============================================================================
// Shared mock pipeline
// ============================================================================

/// Scripted pipeline: answers every request with the same handler response.
pub struct MockPipeline {
    pub classification: String,
    pub response_data: Option<Value>,
    pub failure: Option<AppError>,
    pub delay_ms: u64,
    pub healthy: bool,
    pub calls: AtomicUsize,
}

impl MockPipeline {
    pub fn answering(classification: &str, response_data: Value) -> Self {
        Self {
            classification: classification.to_string(),
            response_data: Some(response_data),
            failure: None,
            delay_ms: 0,
            healthy: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn without_response_data(classification: &str) -> Self {
        Self {
            response_data: None,
            ..Self::answering(classification, Value::Null)
        }
    }

    pub fn failing(error: AppError) -> Self {
        Self {
            failure: Some(error),
            healthy: false,
            ..Self::answering("app_related", Value::Null)
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationPipeline for MockPipeline {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let response_data = match &self.response_data {
            Some(value) => Some(
                serde_json::from_value(value.clone())
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            ),
            None => None,
        };
        Ok(ClassificationResponse {
            classification: self.classification.clone(),
            sub_classification: None,
            subject: None,
            language: Some("English".to_string()),
            original_message: request.message,
            translated_message: None,
            confidence_score: 0.9,
            response_data,
            processing_time_ms: 12.5,
            timestamp: chrono::Utc::now(),
        })
    }

    async fn check_health(&self) -> bool {
        self.healthy
    }
}

/// Handler response for `app_related` with a plain-string reply.
pub fn app_related_reply(text: &str) -> Value {
    json!({
        "status": "success",
        "data": { "classifiedAs": "app_related", "response": text },
        "message": "App-related response generated successfully (local)"
    })
}
