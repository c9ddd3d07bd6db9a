use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::traits::ProviderAdapter;
use super::types::KeyValidation;
use crate::constants::{
    ENHANCE_MAX_TOKENS, GOOGLE_API_URL, GOOGLE_VALIDATION_MODEL, VALIDATION_PROBE_PROMPT,
};
use crate::utils::ProviderError;

/// Adapter for the Google Gemini `generateContent` API.
///
/// Gemini has no system/user split in this call shape, so the system prompt
/// is folded into the single user turn. It also reports a bad key as HTTP
/// 400 INVALID_ARGUMENT rather than 401, so auth classification checks the
/// body as well as the status.
pub struct GoogleAdapter {
    client: Client,
    base_url: String,
}

impl GoogleAdapter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GOOGLE_API_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        text: &str,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": { "maxOutputTokens": ENHANCE_MAX_TOKENS }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST && text.contains("API key") {
                return Err(ProviderError::Auth(text));
            }
            return Err(ProviderError::from_status(status, text));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ProviderError::Api(format!("Malformed Gemini response: {e}")))
    }
}

#[async_trait]
impl ProviderAdapter for GoogleAdapter {
    async fn enhance(
        &self,
        prompt: &str,
        model: &str,
        api_key: Option<&str>,
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        let api_key =
            api_key.ok_or_else(|| ProviderError::Auth("Google requires an API key".to_string()))?;

        debug!("google: enhancing with model {}", model);
        let text = format!("{}\n\nUser prompt to enhance: {}", system_prompt, prompt);

        let response = self.generate_content(model, api_key, &text).await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ProviderError::Api("Gemini response contained no candidates".to_string()))
    }

    async fn validate_key(&self, api_key: &str) -> Result<KeyValidation, ProviderError> {
        match self
            .generate_content(GOOGLE_VALIDATION_MODEL, api_key, VALIDATION_PROBE_PROMPT)
            .await
        {
            Ok(_) => Ok(KeyValidation::ok()),
            Err(err) if err.is_auth() => Ok(KeyValidation::invalid("Invalid API key")),
            Err(other) => Err(other),
        }
    }
}

// Response structures for the generateContent API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn adapter(url: &str) -> GoogleAdapter {
        GoogleAdapter::new(Client::new()).with_base_url(url)
    }

    #[tokio::test]
    async fn test_enhance_extracts_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Plan a weekend trip..."}]}}]}"#,
            )
            .create_async()
            .await;

        let enhanced = adapter(&server.url())
            .enhance("plan a trip", "gemini-2.0-flash", Some("AIza-valid"), "rules")
            .await
            .unwrap();

        assert_eq!(enhanced, "Plan a weekend trip...");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_key_reported_as_400_maps_to_invalid() {
        // Gemini signals a rejected key with 400, not 401
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let validation = adapter(&server.url()).validate_key("AIza-bad").await.unwrap();
        assert_eq!(validation, KeyValidation::invalid("Invalid API key"));
    }

    #[tokio::test]
    async fn test_validate_key_accepted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hi there!"}]}}]}"#)
            .create_async()
            .await;

        let validation = adapter(&server.url()).validate_key("AIza-good").await.unwrap();
        assert_eq!(validation, KeyValidation::ok());
    }

    #[tokio::test]
    async fn test_other_400s_stay_generic() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(400)
            .with_body(r#"{"error":{"message":"Unknown field in request"}}"#)
            .create_async()
            .await;

        let err = adapter(&server.url())
            .enhance("hi", "gemini-2.0-flash", Some("AIza"), "rules")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
    }

    #[tokio::test]
    async fn test_system_prompt_is_folded_into_user_turn() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"contents":[{"role":"user","parts":[{"text":"be concise\n\nUser prompt to enhance: fix my resume"}]}]}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
            .create_async()
            .await;

        adapter(&server.url())
            .enhance("fix my resume", "gemini-1.5-pro", Some("AIza"), "be concise")
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
