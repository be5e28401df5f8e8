pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dictionary", get(handlers::handle_dictionary))
        // Single-document operations
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/skills", post(handlers::handle_skills))
        .route("/api/v1/gap", post(handlers::handle_gap))
        // Full resume-vs-job analysis
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .layer(body_limit)
        .with_state(state)
}
