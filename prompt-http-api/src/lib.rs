pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use prompt_runtime::BackendClient;

pub use config::ProxyConfig;

pub struct PromptApiState {
    pub backend: BackendClient,
}

impl PromptApiState {
    pub fn from_config(config: &ProxyConfig) -> Self {
        let mut backend = BackendClient::new(config.upstream_base_url.clone());
        if let Some(timeout) = config.upstream_timeout {
            backend = backend.with_timeout(timeout);
        }
        Self { backend }
    }
}

/// `*` or empty allows any origin, otherwise a comma-separated allow list.
pub fn cors_layer(origins: &str) -> CorsLayer {
    if origins == "*" || origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let parsed: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn build_router(state: Arc<PromptApiState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::get_prompt::router())
        .with_state(state)
}
