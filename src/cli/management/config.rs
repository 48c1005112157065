use clap::{Args, Subcommand};

use crate::config::credentials::youtube_keys_from_env;
use crate::config::{Config as AppConfig, SpotifyCredentials};
use crate::error::{EnrichError, Result};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration and which credentials are set
    Show,

    /// Show configuration file path
    Path,

    /// List all available configuration keys
    Keys,

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  input_path: {}", config.input_path.display());
            println!("  title_column: {}", config.title_column);
            println!("  artist_column: {}", config.artist_column);
            println!("  spotify_output: {}", config.spotify_output.display());
            println!("  youtube_output: {}", config.youtube_output.display());
            println!("  spotify_api_url: {}", config.spotify_api_url);
            println!("  spotify_auth_url: {}", config.spotify_auth_url);
            println!("  youtube_api_url: {}", config.youtube_api_url);
            println!("  request_timeout_seconds: {}", config.request_timeout_seconds);

            println!("\nCredentials:");
            println!(
                "  spotify: {}",
                if SpotifyCredentials::is_configured() { "configured" } else { "missing" }
            );
            let youtube_keys = youtube_keys_from_env().map(|keys| keys.len()).unwrap_or(0);
            println!("  youtube: {} API key(s)", youtube_keys);
        },

        ConfigCommands::Path => {
            let path = AppConfig::config_path()?;
            println!("{}", path.display());
        },

        ConfigCommands::Keys => {
            println!("Available configuration keys:");
            for key in AppConfig::keys() {
                println!("  {}", key);
            }
        },

        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path()?;
            if path.exists() && !force {
                return Err(EnrichError::Validation(format!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            config.save(&path)?;
            println!("Configuration written to {}", path.display());
        },
    }

    Ok(())
}
