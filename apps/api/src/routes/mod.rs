pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(matching::handle_list_roles))
        .route("/api/v1/resume/preview", post(extraction::handle_preview))
        .route("/api/v1/analyze", post(matching::handle_analyze))
        .route("/api/v1/score", post(matching::handle_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
