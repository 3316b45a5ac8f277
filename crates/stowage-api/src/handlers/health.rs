use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Liveness probe; reports the active storage backend.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "storage_backend": state.storage.backend_type().to_string(),
    }))
}
