use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::constants::{
    CREATIVE_SYSTEM_PROMPT, ENHANCEMENT_SYSTEM_PROMPT, FORMAL_SYSTEM_PROMPT,
    TECHNICAL_SYSTEM_PROMPT,
};

#[derive(Parser, Debug)]
#[command(name = "prompti")]
#[command(version = "0.1.0")]
#[command(about = "Rewrite rough prompts into clear, effective prompts", long_about = None)]
pub struct Cli {
    /// Provider to use (anthropic, openai, google, groq, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model id (e.g. claude-3-5-haiku-20241022, gpt-4o, llama3:8b)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Enhancement style preset
    #[arg(short, long, value_enum)]
    pub style: Option<PromptStyle>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Rough prompt to enhance
    pub prompt: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// List available models per provider
    Models,
    /// Check an API key against a provider
    Validate {
        /// Provider whose key to check
        provider: String,
    },
    /// Show version information
    Version,
    /// Check status of providers and the local ollama daemon
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}

/// Preset system prompts shaping how a rough prompt gets rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptStyle {
    Default,
    Formal,
    Creative,
    Technical,
}

impl PromptStyle {
    /// The system prompt this style sends to the provider.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptStyle::Default => ENHANCEMENT_SYSTEM_PROMPT,
            PromptStyle::Formal => FORMAL_SYSTEM_PROMPT,
            PromptStyle::Creative => CREATIVE_SYSTEM_PROMPT,
            PromptStyle::Technical => TECHNICAL_SYSTEM_PROMPT,
        }
    }
}
