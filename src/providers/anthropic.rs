use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::traits::ProviderAdapter;
use super::types::KeyValidation;
use crate::constants::{
    ANTHROPIC_API_URL, ANTHROPIC_API_VERSION, ANTHROPIC_VALIDATION_MODEL, ENHANCE_MAX_TOKENS,
    VALIDATION_MAX_TOKENS, VALIDATION_PROBE_PROMPT,
};
use crate::utils::ProviderError;

/// Adapter for the Anthropic Messages API.
///
/// Auth travels in the `x-api-key` header alongside a pinned
/// `anthropic-version`; the answer comes back as a list of content blocks,
/// of which the first text block is the enhanced prompt.
pub struct AnthropicAdapter {
    client: Client,
    base_url: String,
}

impl AnthropicAdapter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Point the adapter at a custom base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_messages(
        &self,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<MessagesResponse, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, text));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| ProviderError::Api(format!("Malformed Anthropic response: {e}")))
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    async fn enhance(
        &self,
        prompt: &str,
        model: &str,
        api_key: Option<&str>,
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        let api_key = api_key
            .ok_or_else(|| ProviderError::Auth("Anthropic requires an API key".to_string()))?;

        debug!("anthropic: enhancing with model {}", model);
        let body = json!({
            "model": model,
            "max_tokens": ENHANCE_MAX_TOKENS,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": prompt }]
        });

        let response = self.send_messages(api_key, body).await?;
        response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| ProviderError::Api("Anthropic response contained no content".to_string()))
    }

    async fn validate_key(&self, api_key: &str) -> Result<KeyValidation, ProviderError> {
        // No dedicated key-check endpoint; issue a minimal real completion
        let body = json!({
            "model": ANTHROPIC_VALIDATION_MODEL,
            "max_tokens": VALIDATION_MAX_TOKENS,
            "messages": [{ "role": "user", "content": VALIDATION_PROBE_PROMPT }]
        });

        match self.send_messages(api_key, body).await {
            Ok(_) => Ok(KeyValidation::ok()),
            Err(err) if err.is_auth() => Ok(KeyValidation::invalid("Invalid API key")),
            Err(other) => Err(other),
        }
    }
}

// Response structures for the Anthropic Messages API

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}
