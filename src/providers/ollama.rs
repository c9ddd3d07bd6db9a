use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::traits::ProviderAdapter;
use super::types::{KeyValidation, ModelInfo};
use crate::constants::DEFAULT_OLLAMA_URL;
use crate::utils::ProviderError;

/// Adapter for a local ollama daemon.
///
/// Ollama needs no credential, and its absence is an expected condition:
/// model discovery degrades to an empty list instead of failing.
pub struct OllamaAdapter {
    client: Client,
    base_url: String,
}

impl OllamaAdapter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_OLLAMA_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// List models served by the local daemon.
    ///
    /// Returns an empty list on any failure (daemon not running, non-success
    /// status, malformed body). Each call queries the daemon fresh; nothing is
    /// cached between calls.
    pub async fn list_models(&self) -> Vec<ModelInfo> {
        let url = format!("{}/api/tags", self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("ollama not reachable: {}", err);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            return Vec::new();
        }

        let tags: TagsResponse = match response.json().await {
            Ok(tags) => tags,
            Err(err) => {
                debug!("ollama tags response malformed: {}", err);
                return Vec::new();
            }
        };

        tags.models
            .into_iter()
            .map(|model| {
                // Size in bytes rendered as gigabytes, display only
                let description = format!("{:.1}GB", model.size as f64 / 1e9);
                ModelInfo {
                    id: model.name.clone(),
                    display_name: model.name,
                    description,
                }
            })
            .collect()
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    async fn enhance(
        &self,
        prompt: &str,
        model: &str,
        _api_key: Option<&str>,
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        debug!("ollama: enhancing with model {}", model);

        // No system/user role distinction on /api/generate
        let full_prompt = format!("{}\n\nUser prompt to enhance: {}", system_prompt, prompt);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "model": model,
                "prompt": full_prompt,
                "stream": false
            }))
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, text));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("Malformed ollama response: {e}")))?;

        Ok(generated.response)
    }

    async fn validate_key(&self, _api_key: &str) -> Result<KeyValidation, ProviderError> {
        // No key needed, nothing to probe
        Ok(KeyValidation::ok())
    }
}

// Response structures for the ollama HTTP API

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    #[serde(default)]
    size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn adapter(url: &str) -> OllamaAdapter {
        OllamaAdapter::new(Client::new()).with_base_url(url)
    }

    #[tokio::test]
    async fn test_enhance_concatenates_system_and_user_prompt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"model":"llama3:8b","prompt":"rules\n\nUser prompt to enhance: make this better","stream":false}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"Rewrite this paragraph for clarity..."}"#)
            .create_async()
            .await;

        let enhanced = adapter(&server.url())
            .enhance("make this better", "llama3:8b", None, "rules")
            .await
            .unwrap();

        assert_eq!(enhanced, "Rewrite this paragraph for clarity...");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_enhance_daemon_down_is_a_connectivity_error() {
        // Nothing listens on port 1
        let err = adapter("http://127.0.0.1:1")
            .enhance("hi", "llama3:8b", None, "rules")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Connectivity(_)));
    }

    #[tokio::test]
    async fn test_list_models_maps_size_to_gigabytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models":[{"name":"llama3:8b","size":4700000000}]}"#)
            .create_async()
            .await;

        let models = adapter(&server.url()).list_models().await;
        assert_eq!(
            models,
            vec![ModelInfo::new("llama3:8b", "llama3:8b", "4.7GB")]
        );
    }

    #[tokio::test]
    async fn test_list_models_daemon_down_returns_empty() {
        let models = adapter("http://127.0.0.1:1").list_models().await;
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn test_list_models_malformed_body_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let models = adapter(&server.url()).list_models().await;
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn test_validate_key_never_calls_the_daemon() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let validation = adapter(&server.url()).validate_key("ignored").await.unwrap();
        assert_eq!(validation, KeyValidation::ok());
        mock.assert_async().await;
    }
}
