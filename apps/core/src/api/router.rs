use axum::routing::{get, post};
use axum::Router;

use super::handlers::{classify_full_handler, classify_handler, health_handler, ping_handler, root_handler};
use crate::actors::RelayHandle;

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayHandle,
}

/// Routes of the relay service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .route("/classify", post(classify_handler))
        .route("/classify/full", post(classify_full_handler))
        .with_state(state)
}
