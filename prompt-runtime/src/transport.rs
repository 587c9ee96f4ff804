use async_trait::async_trait;

use crate::error::PromptError;
use crate::types::PromptResult;

pub const DEFAULT_PROXY_BASE_URL: &str = "http://127.0.0.1:3000";

/// How the prompt controller reaches the proxy endpoint.
#[async_trait]
pub trait PromptTransport: Send + Sync {
    async fn fetch_prompt(&self, prompt: &str) -> Result<PromptResult, PromptError>;
}

/// HTTP transport calling the proxy's `GET /api/get-prompt`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PromptTransport for ProxyClient {
    async fn fetch_prompt(&self, prompt: &str) -> Result<PromptResult, PromptError> {
        let url = format!("{}/api/get-prompt", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("prompt", prompt)])
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "proxy responded");

        if !response.status().is_success() {
            return Err(PromptError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        PromptResult::from_slice(&body)
    }
}
