use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;

use crate::PromptApiState;

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

pub fn router() -> Router<Arc<PromptApiState>> {
    Router::new().route("/api/get-prompt", get(get_prompt))
}

/// Relay one prompt to the backend.
///
/// The upstream body is returned byte-for-byte on success. Every upstream
/// failure becomes a 500 with `{"message": ...}`.
async fn get_prompt(
    State(state): State<Arc<PromptApiState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let prompt = prompt_param(&params);
    let prompt = prompt.as_deref();
    tracing::info!(prompt = ?prompt, "Forwarding prompt upstream");

    let body = state.backend.get_prompt(prompt).await.map_err(|e| {
        tracing::warn!("Upstream get-prompt failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: e.to_string(),
            }),
        )
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// The `prompt` value, with repeated parameters joined by `,`.
fn prompt_param(params: &[(String, String)]) -> Option<String> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "prompt")
        .map(|(_, value)| value.as_str())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
