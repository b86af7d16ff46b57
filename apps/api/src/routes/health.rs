use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "RecruitDesk AI API",
        "status": "running",
        "model_loaded": state.model_loaded
    }))
}

/// GET /health
/// Reports the embedding model and which capabilities the engine was built with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let engine = &state.engine;
    Json(json!({
        "status": "healthy",
        "model": engine.embedder().model(),
        "model_loaded": state.model_loaded,
        "nlp_available": engine.nlp().is_available(),
        "embedding_backend": engine.embedder().name(),
        "vocabulary_version": engine.vocabulary().version,
        "skill_terms": engine.vocabulary().len(),
        "section_headers_version": engine.section_headers().version
    }))
}
