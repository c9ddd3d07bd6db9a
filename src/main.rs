use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, ValueEnum};

use prompti::{
    app::load_config,
    cli::{handle_command, Cli, OutputFormat, PromptStyle},
    providers::{EnhanceRequest, Gateway, Provider},
    utils::init_logger,
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging if verbose
    if cli.verbose {
        init_logger();
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)?;
        toml::from_str::<Config>(&toml_str)?
    } else {
        load_config().unwrap_or_default()
    };

    let gateway = Gateway::new()?.with_ollama_base_url(config.ollama.base_url());

    // Handle subcommands
    if let Some(command) = &cli.command {
        return handle_command(command, &config, &gateway).await;
    }

    // No subcommand: enhance the positional prompt
    let Some(prompt) = cli.prompt.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    run_enhance(&cli, &config, &gateway, prompt).await
}

/// Assemble an enhancement request from CLI args and config, send it, and
/// print the result
async fn run_enhance(cli: &Cli, config: &Config, gateway: &Gateway, prompt: String) -> Result<()> {
    let provider: Provider = cli
        .provider
        .as_deref()
        .unwrap_or(&config.default_model.provider)
        .parse()?;

    let model = match cli.model.clone() {
        Some(model) => model,
        None if config.default_model.provider == provider.id() => config.default_model.name.clone(),
        None => {
            // The catalog is ordered most-capable-first, so the first entry
            // is the default choice for a provider picked ad hoc
            let models = gateway.models_for(provider).await;
            match models.into_iter().next() {
                Some(model) => model.id,
                None => bail!(
                    "No models available for {} - is the ollama daemon running?",
                    provider.display_name()
                ),
            }
        }
    };

    // Resolve the credential here, at the caller boundary; the gateway never
    // reads secrets itself
    let api_key = if provider.requires_api_key() {
        match config.resolve_api_key(provider) {
            Some(key) => Some(key),
            None => bail!(
                "{} is not set. Get a key at {} and export it first.",
                config.api_key_env(provider).unwrap_or("the API key variable"),
                provider
                    .key_console_url()
                    .unwrap_or("the provider's console"),
            ),
        }
    } else {
        None
    };

    let request = EnhanceRequest {
        prompt,
        provider,
        model: model.clone(),
        api_key,
        system_prompt: resolve_system_prompt(cli, config),
    };

    let enhanced = gateway.enhance(&request).await?;

    match cli.output_format {
        OutputFormat::Text => println!("{}", enhanced),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "provider": provider.id(),
                "model": model,
                "enhanced": enhanced,
            })
        ),
    }

    Ok(())
}

/// Pick the system prompt: an explicit --style beats the configured custom
/// prompt, which beats the configured preset style
fn resolve_system_prompt(cli: &Cli, config: &Config) -> String {
    if let Some(style) = cli.style {
        return style.system_prompt().to_string();
    }
    if let Some(custom) = &config.prompt.custom {
        if !custom.trim().is_empty() {
            return custom.clone();
        }
    }
    PromptStyle::from_str(&config.prompt.style, true)
        .unwrap_or(PromptStyle::Default)
        .system_prompt()
        .to_string()
}
