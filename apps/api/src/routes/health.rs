use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the active snapshot's generation and corpus size.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.engine.snapshot();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "generation": snapshot.generation(),
        "postings": snapshot.postings().len(),
        "feedback_provider": state.feedback.provider_name(),
    }))
}
