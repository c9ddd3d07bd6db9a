use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::traits::ProviderAdapter;
use super::types::KeyValidation;
use crate::constants::{
    ENHANCE_MAX_TOKENS, OPENAI_API_URL, OPENAI_VALIDATION_MODEL, VALIDATION_MAX_TOKENS,
    VALIDATION_PROBE_PROMPT,
};
use crate::utils::ProviderError;

/// Adapter for the OpenAI chat completions API.
pub struct OpenAiAdapter {
    client: Client,
    base_url: String,
}

impl OpenAiAdapter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Point the adapter at a custom base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_completion(
        &self,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
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
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Api(format!("Malformed OpenAI response: {e}")))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    async fn enhance(
        &self,
        prompt: &str,
        model: &str,
        api_key: Option<&str>,
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        let api_key =
            api_key.ok_or_else(|| ProviderError::Auth("OpenAI requires an API key".to_string()))?;

        debug!("openai: enhancing with model {}", model);
        let body = json!({
            "model": model,
            "max_tokens": ENHANCE_MAX_TOKENS,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": prompt }
            ]
        });

        let response = self.send_completion(api_key, body).await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Api("OpenAI response contained no choices".to_string()))
    }

    async fn validate_key(&self, api_key: &str) -> Result<KeyValidation, ProviderError> {
        let body = json!({
            "model": OPENAI_VALIDATION_MODEL,
            "max_tokens": VALIDATION_MAX_TOKENS,
            "messages": [{ "role": "user", "content": VALIDATION_PROBE_PROMPT }]
        });

        match self.send_completion(api_key, body).await {
            Ok(_) => Ok(KeyValidation::ok()),
            Err(err) if err.is_auth() => Ok(KeyValidation::invalid("Invalid API key")),
            Err(other) => Err(other),
        }
    }
}

// Response structures for the chat completions API

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn adapter(url: &str) -> OpenAiAdapter {
        OpenAiAdapter::new(Client::new()).with_base_url(url)
    }

    #[tokio::test]
    async fn test_enhance_extracts_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Draft a concise status update..."}}]}"#)
            .create_async()
            .await;

        let enhanced = adapter(&server.url())
            .enhance("write an update", "gpt-4o", Some("sk-valid"), "rules")
            .await
            .unwrap();

        assert_eq!(enhanced, "Draft a concise status update...");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_validate_key_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"code":"invalid_api_key"}}"#)
            .create_async()
            .await;

        let validation = adapter(&server.url()).validate_key("sk-bad").await.unwrap();
        assert_eq!(validation, KeyValidation::invalid("Invalid API key"));
    }

    #[tokio::test]
    async fn test_validate_key_accepted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hi!"}}]}"#)
            .create_async()
            .await;

        let validation = adapter(&server.url()).validate_key("sk-good").await.unwrap();
        assert_eq!(validation, KeyValidation::ok());
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = adapter(&server.url())
            .enhance("hi", "gpt-4o", Some("sk"), "rules")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
    }
}
