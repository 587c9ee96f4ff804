//! Binary runner for the get-prompt proxy.
//!
//! Reads `ProxyConfig` from the environment (and `.env`), then serves
//! `/api/get-prompt` and `/health` with CORS until interrupted.

use std::sync::Arc;

use prompt_http_api::{PromptApiState, ProxyConfig, build_router, cors_layer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_log();

    let config = ProxyConfig::from_env();
    tracing::info!(
        "Proxying get-prompt to {} (timeout: {:?})",
        config.upstream_base_url,
        config.upstream_timeout,
    );

    let state = Arc::new(PromptApiState::from_config(&config));
    let router = build_router(state).layer(cors_layer(&config.cors_allowed_origins));

    let listener = tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.port))
        .await
        .map_err(|e| format!("Proxy bind failed on {}:{}: {e}", config.bind_addr, config.port))?;
    tracing::info!("Prompt proxy listening on {}:{}", config.bind_addr, config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
            }
            tracing::info!("Shutting down prompt proxy");
        })
        .await?;

    Ok(())
}

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}
