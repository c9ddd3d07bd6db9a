use async_trait::async_trait;

use super::types::KeyValidation;
use crate::utils::ProviderError;

/// Core trait that all provider adapters must implement
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Rewrite a rough prompt into an enhanced one using `model`.
    ///
    /// Issues exactly one network call. Fails with the most specific
    /// `ProviderError` the backend's status signal allows.
    async fn enhance(
        &self,
        prompt: &str,
        model: &str,
        api_key: Option<&str>,
        system_prompt: &str,
    ) -> Result<String, ProviderError>;

    /// Check an API key with a minimal real completion call.
    ///
    /// An authorization rejection maps to `valid: false`; any other failure
    /// is re-raised unchanged so the dispatcher can classify it as a
    /// generic provider problem rather than a bad key.
    async fn validate_key(&self, api_key: &str) -> Result<KeyValidation, ProviderError>;
}
