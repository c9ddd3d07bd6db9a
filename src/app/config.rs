use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_PORT};
use crate::providers::Provider;

/// Main configuration structure
///
/// Credentials never live here: each provider section only names the
/// environment variable the key is read from, and resolution happens at the
/// CLI boundary before a request is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default model configuration
    #[serde(default)]
    pub default_model: ModelSettings,

    /// Enhancement prompt configuration
    #[serde(default)]
    pub prompt: PromptSettings,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Anthropic configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// OpenAI configuration
    #[serde(default)]
    pub openai: OpenAIConfig,

    /// Google configuration
    #[serde(default)]
    pub google: GoogleConfig,

    /// Groq configuration
    #[serde(default)]
    pub groq: GroqConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: ModelSettings::default(),
            prompt: PromptSettings::default(),
            ollama: OllamaConfig::default(),
            anthropic: AnthropicConfig::default(),
            openai: OpenAIConfig::default(),
            google: GoogleConfig::default(),
            groq: GroqConfig::default(),
        }
    }
}

impl Config {
    /// Environment variable holding the API key for a provider. None for
    /// ollama, which takes no key.
    pub fn api_key_env(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Anthropic => Some(&self.anthropic.api_key_env),
            Provider::Openai => Some(&self.openai.api_key_env),
            Provider::Google => Some(&self.google.api_key_env),
            Provider::Groq => Some(&self.groq.api_key_env),
            Provider::Ollama => None,
        }
    }

    /// Read the provider's API key from its configured environment variable.
    pub fn resolve_api_key(&self, provider: Provider) -> Option<String> {
        let env_name = self.api_key_env(provider)?;
        std::env::var(env_name).ok().filter(|key| !key.is_empty())
    }
}

/// Default model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Provider id (anthropic, openai, google, groq, ollama)
    pub provider: String,
    /// Model id from that provider's catalog
    pub name: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            name: "claude-3-5-haiku-20241022".to_string(),
        }
    }
}

/// Enhancement prompt settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Preset style (default, formal, creative, technical)
    pub style: String,
    /// Custom system prompt, overrides the preset when non-empty
    pub custom: Option<String>,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            style: "default".to_string(),
            custom: None,
        }
    }
}

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    pub host: String,
    /// Ollama server port
    pub port: u16,
}

impl OllamaConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
        }
    }
}

/// Anthropic configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Environment variable containing API key
    pub api_key_env: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
        }
    }
}

/// OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// Environment variable containing API key
    pub api_key_env: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Google configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Environment variable containing API key
    pub api_key_env: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
        }
    }
}

/// Groq configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Environment variable containing API key
    pub api_key_env: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");

    // Build figment configuration
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    // Add environment variables (PROMPTI_ prefix)
    figment = figment.merge(Env::prefixed("PROMPTI_"));

    // Extract and return config
    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "prompti") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("prompti");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        let default_config = Config::default();
        save_config(&default_config, Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    Ok(())
}
