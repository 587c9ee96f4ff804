use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::PromptApiState;

pub fn router() -> Router<Arc<PromptApiState>> {
    Router::new().route("/health", get(health))
}

/// Liveness only; the upstream is not probed.
async fn health(State(state): State<Arc<PromptApiState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "upstream": state.backend.base_url(),
    }))
}
