use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    providers::{Gateway, Provider},
};

use super::Commands;

/// Handle CLI subcommands
pub async fn handle_command(command: &Commands, config: &Config, gateway: &Gateway) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Initializing Prompti configuration...");
            init_config()
        }
        Commands::Models => list_models(gateway).await,
        Commands::Validate { provider } => validate_key(provider, config, gateway).await,
        Commands::Version => {
            show_version();
            Ok(())
        }
        Commands::Status => show_status(config, gateway).await,
    }
}

/// List selectable models for every provider
async fn list_models(gateway: &Gateway) -> Result<()> {
    for provider in Provider::ALL {
        println!("{}", provider.display_name().bold());
        let models = gateway.models_for(provider).await;
        if models.is_empty() {
            // Only ollama can come up empty; its list is live-discovered
            println!("  (no local models - is the ollama daemon running?)");
        } else {
            for model in models {
                println!("  • {} - {}", model.id.green(), model.description.dimmed());
            }
        }
        println!();
    }
    Ok(())
}

/// Check a provider's API key from its configured environment variable
async fn validate_key(provider_name: &str, config: &Config, gateway: &Gateway) -> Result<()> {
    let provider: Provider = provider_name.parse()?;

    let Some(env_name) = config.api_key_env(provider) else {
        println!("{} needs no API key.", provider.display_name());
        return Ok(());
    };

    let Some(api_key) = config.resolve_api_key(provider) else {
        println!("{} {} is not set", "[ERROR]".red(), env_name);
        if let Some(url) = provider.key_console_url() {
            println!("      Get a key at: {}", url);
        }
        return Ok(());
    };

    println!("Checking {} key...", provider.display_name());
    let validation = gateway.validate_key(provider, &api_key).await;
    if validation.valid {
        println!("{} API key is valid", "[OK]".green());
    } else {
        let reason = validation
            .reason
            .unwrap_or_else(|| "unknown failure".to_string());
        println!("{} {}", "[ERROR]".red(), reason);
        if let Some(url) = provider.key_console_url() {
            println!("      Get a new key at: {}", url);
        }
    }
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("Prompti v{}", env!("CARGO_PKG_VERSION"));
    println!("   Rewrite rough prompts into clear, effective prompts");
}

/// Show status of providers and local dependencies
async fn show_status(config: &Config, gateway: &Gateway) -> Result<()> {
    println!("Prompti Status:");
    println!();

    // Check Ollama
    if which::which("ollama").is_ok() {
        let models = gateway.list_local_models().await;
        if models.is_empty() {
            println!("  [WARNING] Ollama: Installed (daemon not reachable or no models)");
        } else {
            println!("  [OK] Ollama: Running ({} models available)", models.len());
            for model in models.iter().take(3) {
                println!("      • {} ({})", model.id, model.description);
            }
            if models.len() > 3 {
                println!("      ... and {} more", models.len() - 3);
            }
        }
    } else {
        println!("  [ERROR] Ollama: Not installed");
    }

    // Check configuration
    if let Ok(config_dir) = get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            println!("  [OK] Configuration: {}", config_path.display());
        } else {
            println!("  [WARNING] Configuration: Not found (using defaults)");
        }
    }

    // Environment variables
    println!("\n  Environment:");
    for provider in Provider::ALL {
        if let Some(env_name) = config.api_key_env(provider) {
            if std::env::var(env_name).is_ok() {
                println!("    • {}: Set", env_name);
            } else {
                println!("    • {}: Not set", env_name);
            }
        }
    }

    println!();
    Ok(())
}
