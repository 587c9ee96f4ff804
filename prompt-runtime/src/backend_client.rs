use bytes::Bytes;
use serde::de::IgnoredAny;

use crate::error::PromptError;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client for the mech backend's `GET /get-prompt` route.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<std::time::Duration>,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a prompt upstream and return the JSON body untouched.
    ///
    /// A `None` prompt omits the query parameter so the backend applies its
    /// own default. Transport errors, non-2xx statuses and non-JSON bodies
    /// are all errors.
    pub async fn get_prompt(&self, prompt: Option<&str>) -> Result<Bytes, PromptError> {
        let url = format!("{}/get-prompt", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(prompt) = prompt {
            request = request.query(&[("prompt", prompt)]);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let body = request.send().await?.error_for_status()?.bytes().await?;

        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| PromptError::MalformedBody(e.to_string()))?;

        Ok(body)
    }
}
