use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod utils;

use cli::*;
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "catalog-enrich")]
#[command(about = "Enrich a song catalog with Spotify and YouTube metadata")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up every catalog row on Spotify
    Spotify(EnrichArgs),

    /// Look up every catalog row on YouTube, rotating API keys on quota errors
    Youtube(EnrichArgs),

    /// Show or initialize configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Spotify(args) => execute_spotify(args, &config).await,
        Commands::Youtube(args) => execute_youtube(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config).await,
    }
}
