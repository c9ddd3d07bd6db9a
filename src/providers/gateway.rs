use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::anthropic::AnthropicAdapter;
use super::catalog;
use super::google::GoogleAdapter;
use super::groq::GroqAdapter;
use super::ollama::OllamaAdapter;
use super::openai::OpenAiAdapter;
use super::traits::ProviderAdapter;
use super::types::{EnhanceRequest, KeyValidation, ModelInfo, Provider};
use crate::constants::HTTP_REQUEST_TIMEOUT_SECS;
use crate::utils::ProviderError;

/// Front door for all provider traffic.
///
/// Holds one adapter per provider over a shared HTTP client and exposes the
/// three gateway operations: `enhance`, `validate_key`, and local model
/// discovery. The gateway keeps no state between calls (no retries, no
/// caching, no timeout policy beyond the transport's own), so concurrent
/// calls are independent.
pub struct Gateway {
    anthropic: AnthropicAdapter,
    openai: OpenAiAdapter,
    google: GoogleAdapter,
    groq: GroqAdapter,
    ollama: OllamaAdapter,
}

impl Gateway {
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Api(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client))
    }

    fn with_client(client: Client) -> Self {
        Self {
            anthropic: AnthropicAdapter::new(client.clone()),
            openai: OpenAiAdapter::new(client.clone()),
            google: GoogleAdapter::new(client.clone()),
            groq: GroqAdapter::new(client.clone()),
            ollama: OllamaAdapter::new(client),
        }
    }

    /// Point the ollama adapter at a non-default daemon address.
    #[must_use]
    pub fn with_ollama_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.ollama = self.ollama.with_base_url(base_url);
        self
    }

    /// Resolve a provider to its adapter. Exhaustive: adding a `Provider`
    /// variant forces an update here at compile time.
    fn adapter(&self, provider: Provider) -> &dyn ProviderAdapter {
        match provider {
            Provider::Anthropic => &self.anthropic,
            Provider::Openai => &self.openai,
            Provider::Google => &self.google,
            Provider::Groq => &self.groq,
            Provider::Ollama => &self.ollama,
        }
    }

    /// Enhance a rough prompt through the requested provider.
    ///
    /// Adapter failures propagate unchanged; the caller requested this
    /// action explicitly and decides how to present the outcome.
    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<String, ProviderError> {
        debug!(
            "enhance: provider={} model={}",
            request.provider, request.model
        );
        self.adapter(request.provider)
            .enhance(
                &request.prompt,
                &request.model,
                request.api_key.as_deref(),
                &request.system_prompt,
            )
            .await
    }

    /// Check an API key against a provider.
    ///
    /// This is a background probe, so it never fails: providers that need no
    /// key validate trivially, and any probe error folds into
    /// `{valid: false, reason}`.
    pub async fn validate_key(&self, provider: Provider, api_key: &str) -> KeyValidation {
        if !provider.requires_api_key() {
            return KeyValidation::ok();
        }
        match self.adapter(provider).validate_key(api_key).await {
            Ok(validation) => validation,
            Err(err) => KeyValidation::invalid(err.to_string()),
        }
    }

    /// Models currently served by the local ollama daemon.
    ///
    /// Empty when the daemon is not running; never an error.
    pub async fn list_local_models(&self) -> Vec<ModelInfo> {
        self.ollama.list_models().await
    }

    /// All selectable models for a provider: the curated static list for
    /// hosted providers, live discovery for ollama.
    pub async fn models_for(&self, provider: Provider) -> Vec<ModelInfo> {
        match provider {
            Provider::Ollama => self.list_local_models().await,
            hosted => catalog::static_models(hosted),
        }
    }
}
