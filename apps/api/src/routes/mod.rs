pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Matching API
        .route("/api/resume-match", post(handlers::handle_resume_match))
        .route("/api/job-suggestion", post(handlers::handle_job_suggestion))
        // Admin
        .route("/api/admin/reload", post(handlers::handle_reload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
