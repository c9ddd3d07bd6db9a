use once_cell::sync::Lazy;

use super::types::{ModelInfo, Provider};

// Curated model lists, most-capable-first. The ordering drives default
// selection in any consuming UI and must be preserved exactly.

static ANTHROPIC_MODELS: Lazy<Vec<ModelInfo>> = Lazy::new(|| {
    vec![
        ModelInfo::new("claude-opus-4-5-20251101", "Claude Opus 4.5", "Most capable"),
        ModelInfo::new("claude-sonnet-4-20250514", "Claude Sonnet 4", "Balanced"),
        ModelInfo::new("claude-3-5-haiku-20241022", "Claude Haiku", "Fast & affordable"),
    ]
});

static OPENAI_MODELS: Lazy<Vec<ModelInfo>> = Lazy::new(|| {
    vec![
        ModelInfo::new("gpt-4o", "GPT-4o", "Latest flagship"),
        ModelInfo::new("gpt-4-turbo", "GPT-4 Turbo", "Fast & capable"),
        ModelInfo::new("gpt-4", "GPT-4", "Original GPT-4"),
        ModelInfo::new("gpt-3.5-turbo", "GPT-3.5 Turbo", "Fast & affordable"),
    ]
});

static GOOGLE_MODELS: Lazy<Vec<ModelInfo>> = Lazy::new(|| {
    vec![
        ModelInfo::new("gemini-2.0-flash", "Gemini 2.0 Flash", "Latest & fastest"),
        ModelInfo::new("gemini-1.5-pro", "Gemini 1.5 Pro", "Most capable"),
        ModelInfo::new("gemini-1.5-flash", "Gemini 1.5 Flash", "Fast & efficient"),
    ]
});

static GROQ_MODELS: Lazy<Vec<ModelInfo>> = Lazy::new(|| {
    vec![
        ModelInfo::new("llama-3.3-70b-versatile", "Llama 3.3 70B", "Most capable"),
        ModelInfo::new("mixtral-8x7b-32768", "Mixtral 8x7B", "Fast mixture of experts"),
        ModelInfo::new("gemma2-9b-it", "Gemma 2 9B", "Compact & fast"),
    ]
});

/// Static catalog lookup for a provider's selectable models.
///
/// Ollama's models are discovered at runtime from the local daemon (see
/// `Gateway::list_local_models`), so its static list is empty.
pub fn static_models(provider: Provider) -> Vec<ModelInfo> {
    match provider {
        Provider::Anthropic => ANTHROPIC_MODELS.clone(),
        Provider::Openai => OPENAI_MODELS.clone(),
        Provider::Google => GOOGLE_MODELS.clone(),
        Provider::Groq => GROQ_MODELS.clone(),
        Provider::Ollama => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_every_hosted_provider_has_models() {
        for provider in Provider::ALL {
            let models = static_models(provider);
            if provider == Provider::Ollama {
                assert!(models.is_empty());
            } else {
                assert!(!models.is_empty(), "{provider} catalog is empty");
            }
        }
    }

    #[test]
    fn test_model_ids_are_unique_per_provider() {
        for provider in Provider::ALL {
            let models = static_models(provider);
            let ids: HashSet<_> = models.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids.len(), models.len(), "{provider} has duplicate ids");
        }
    }

    #[test]
    fn test_curated_order_is_preserved() {
        // Most-capable-first ordering is part of the contract: the first
        // entry is what a caller picks when no model was specified.
        let anthropic = static_models(Provider::Anthropic);
        assert_eq!(anthropic[0].id, "claude-opus-4-5-20251101");
        assert_eq!(anthropic.last().unwrap().id, "claude-3-5-haiku-20241022");

        let openai = static_models(Provider::Openai);
        assert_eq!(openai[0].id, "gpt-4o");

        let groq = static_models(Provider::Groq);
        assert_eq!(groq[0].id, "llama-3.3-70b-versatile");
    }
}
