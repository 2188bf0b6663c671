use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use super::router::AppState;
use crate::error::AppError;
use crate::models::{ClassificationResponse, ClassifyRequest, HealthResponse};
use crate::normalizer::NormalizedResponse;

pub const SERVICE_TITLE: &str = "Educational Query Classifier Relay";
pub const SERVICE_DESCRIPTION: &str =
    "Relays chat queries to the classification pipeline and returns a flat {status, message} reply";

/// Service information
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": SERVICE_TITLE,
        "version": env!("CARGO_PKG_VERSION"),
        "description": SERVICE_DESCRIPTION,
        "endpoints": {
            "classification": "/classify",
            "classification_full": "/classify/full",
            "health": "/health"
        }
    }))
}

/// Health check, including upstream reachability
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream = if state.relay.upstream_healthy().await {
        "reachable"
    } else {
        "unreachable"
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: upstream.to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn ping_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `{status, message}` reply for messaging clients
pub async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<NormalizedResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    info!(chars = request.message.chars().count(), "Classification request received");
    let normalized = state.relay.relay(request).await?;
    Ok(Json(normalized))
}

/// Upstream envelope, unmodified
pub async fn classify_full_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassificationResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let response = state.relay.classify_full(request).await?;
    Ok(Json(response))
}
