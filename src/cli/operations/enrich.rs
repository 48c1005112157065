use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::credentials::youtube_keys_from_env;
use crate::config::{ApiKey, Config, SpotifyCredentials};
use crate::core::catalog::{load_catalog, save_enriched, CatalogRow};
use crate::core::enrich::{run_batch, BatchSummary, RowLookup, SpotifyLookup, YoutubeLookup};
use crate::core::query::{spotify_track_query, youtube_video_query, SearchQuery};
use crate::core::rotation::CredentialRotator;
use crate::core::services::{build_http_client, SpotifyClient, YoutubeClient};
use crate::error::Result;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct EnrichArgs {
    /// Song catalog CSV (defaults to the configured input_path)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output CSV (defaults to the configured provider output)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the queries that would be sent, without calling the provider
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute_spotify(args: EnrichArgs, config: &Config) -> Result<()> {
    let rows = load_rows(&args, config)?;

    if args.dry_run {
        print_queries(&rows, spotify_track_query);
        return Ok(());
    }

    let credentials = SpotifyCredentials::from_env()?;
    let http = build_http_client(config.request_timeout_seconds)?;
    let client = SpotifyClient::new(http, &config.spotify_api_url, &config.spotify_auth_url, credentials);
    let mut lookup = SpotifyLookup::new(client);

    let output = args.output.unwrap_or_else(|| config.spotify_output.clone());
    run_and_save(&mut lookup, &rows, &output).await
}

pub async fn execute_youtube(args: EnrichArgs, config: &Config) -> Result<()> {
    let rows = load_rows(&args, config)?;

    if args.dry_run {
        print_queries(&rows, youtube_video_query);
        return Ok(());
    }

    let keys = youtube_keys_from_env()?;
    info!("Loaded {} YouTube API keys", keys.len());

    let http = build_http_client(config.request_timeout_seconds)?;
    let api_url = config.youtube_api_url.clone();
    let rotator = CredentialRotator::new(keys, move |key: &ApiKey| {
        YoutubeClient::new(http.clone(), &api_url, key.clone())
    })?;
    let mut lookup = YoutubeLookup::new(rotator);

    let output = args.output.unwrap_or_else(|| config.youtube_output.clone());
    run_and_save(&mut lookup, &rows, &output).await?;

    info!(
        "Finished on API key {} of {}",
        lookup.rotator().active_index() + 1,
        lookup.rotator().pool_size()
    );
    Ok(())
}

fn load_rows(args: &EnrichArgs, config: &Config) -> Result<Vec<CatalogRow>> {
    let input = args.input.as_deref().unwrap_or(&config.input_path);
    info!("📥 Loading catalog: {}", input.display());
    load_catalog(input, &config.title_column, &config.artist_column)
}

fn print_queries(rows: &[CatalogRow], build: fn(&CatalogRow) -> SearchQuery) {
    info!("🧪 DRY RUN - would search {} rows:", rows.len());
    for (i, row) in rows.iter().enumerate() {
        let query = build(row);
        println!("  {}. [{}] {}", i + 1, query.kind.as_str(), query.text);
    }
}

async fn run_and_save<L: RowLookup>(lookup: &mut L, rows: &[CatalogRow], output: &Path) -> Result<()> {
    let progress = ProgressUtils::create_batch_progress(rows.len() as u64);
    let (results, summary) = run_batch(lookup, rows, &progress).await;
    progress.finish_with_message(ProgressMessages::finished(lookup.provider_name(), summary.matched, summary.total));

    // Rows are only persisted once the whole batch has been looked up
    save_enriched(output, &results)?;

    if summary.failed > 0 {
        warn!(
            "{} of {} {} lookups failed with provider errors; see the log above",
            summary.failed,
            summary.total,
            lookup.provider_name()
        );
    }

    print_summary(lookup.provider_name(), &summary, output);
    Ok(())
}

fn print_summary(provider: &str, summary: &BatchSummary, output: &Path) {
    println!("\n📊 {} Enrichment Summary:", provider);
    println!("  ✅ Matched: {}", summary.matched);
    println!("  ❔ No match: {}", summary.no_match);
    if summary.exhausted > 0 {
        println!("  ⛔ Quota exhausted on every key: {}", summary.exhausted);
    }
    if summary.failed > 0 {
        println!("  ❌ Failed: {}", summary.failed);
    }
    println!("  📈 Match Rate: {:.1}%", summary.match_rate());
    println!("  💾 Saved to {}", output.display());
}
