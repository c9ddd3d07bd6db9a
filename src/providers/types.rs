use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::ProviderError;

/// The five supported text-generation providers. Four are hosted APIs, the
/// fifth (ollama) is a locally-reachable daemon needing no API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    Openai,
    Google,
    Groq,
    Ollama,
}

impl Provider {
    /// All providers, in display order.
    pub const ALL: [Provider; 5] = [
        Provider::Anthropic,
        Provider::Openai,
        Provider::Google,
        Provider::Groq,
        Provider::Ollama,
    ];

    /// Stable identifier used in config files and on the CLI.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Openai => "openai",
            Provider::Google => "google",
            Provider::Groq => "groq",
            Provider::Ollama => "ollama",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic (Claude)",
            Provider::Openai => "OpenAI (GPT)",
            Provider::Google => "Google (Gemini)",
            Provider::Groq => "Groq",
            Provider::Ollama => "Ollama (Local)",
        }
    }

    /// Whether this provider needs an API key. Ollama runs locally and
    /// never takes one.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Provider::Ollama)
    }

    /// Console URL where a user can create an API key.
    pub fn key_console_url(&self) -> Option<&'static str> {
        match self {
            Provider::Anthropic => Some("https://console.anthropic.com/settings/keys"),
            Provider::Openai => Some("https://platform.openai.com/api-keys"),
            Provider::Google => Some("https://aistudio.google.com/app/apikey"),
            Provider::Groq => Some("https://console.groq.com/keys"),
            Provider::Ollama => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::Openai),
            "google" | "gemini" => Ok(Provider::Google),
            "groq" => Ok(Provider::Groq),
            "ollama" => Ok(Provider::Ollama),
            other => Err(ProviderError::UnknownProvider(other.to_string())),
        }
    }
}

/// A selectable model offered by a provider.
///
/// `id` is the exact value sent back to the provider on a subsequent call;
/// it is unique within a provider's set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

impl ModelInfo {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// A single prompt-enhancement request, fully assembled by the caller.
///
/// The gateway never reads config or stored secrets itself: `api_key` and
/// `system_prompt` arrive pre-resolved.
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    /// The rough prompt to rewrite
    pub prompt: String,
    /// Which provider handles the request
    pub provider: Provider,
    /// Model id from that provider's catalog
    pub model: String,
    /// Required for hosted providers, ignored by ollama
    pub api_key: Option<String>,
    /// Resolved upstream; the gateway applies no fallback of its own
    pub system_prompt: String,
}

/// Outcome of an API key check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValidation {
    pub valid: bool,
    pub reason: Option<String>,
}

impl KeyValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_provider_id_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(provider.id().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = "deepseek".parse::<Provider>().unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(name) if name == "deepseek"));
    }

    #[test]
    fn test_gemini_alias() {
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!("  Google ".parse::<Provider>().unwrap(), Provider::Google);
    }

    #[test]
    fn test_only_ollama_skips_api_key() {
        for provider in Provider::ALL {
            assert_eq!(
                provider.requires_api_key(),
                provider != Provider::Ollama,
                "{provider}"
            );
            assert_eq!(
                provider.key_console_url().is_some(),
                provider.requires_api_key()
            );
        }
    }
}
