//! Per-row lookup stage and the batch driver.
//!
//! Every provider failure is caught here and normalized into a
//! `LookupOutcome`, so nothing that happens to a single row can abort the
//! batch. The driver walks the catalog strictly in order, one awaited lookup
//! at a time, and returns the accumulated rows for a single write.

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::core::catalog::CatalogRow;
use crate::core::metadata::{MetadataRecord, SpotifyMetadata, YoutubeMetadata};
use crate::core::query::{spotify_track_query, youtube_video_query, SearchQuery};
use crate::core::rotation::{CredentialRotator, RotationError};
use crate::core::services::{SearchProvider, SpotifyTrack, YoutubeVideo};

/// Result of looking up one catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<M> {
    Matched(M),
    NoMatch,
    /// Every key in the pool hit its quota for this row
    Exhausted,
    /// The provider answered with an error other than quota exhaustion
    Failed,
}

impl<M> LookupOutcome<M> {
    pub fn from_first<T, F>(items: Vec<T>, map: F) -> Self
    where
        F: FnOnce(T) -> Option<M>,
    {
        items
            .into_iter()
            .next()
            .and_then(map)
            .map(LookupOutcome::Matched)
            .unwrap_or(LookupOutcome::NoMatch)
    }

    pub fn into_metadata(self) -> Option<M> {
        match self {
            LookupOutcome::Matched(metadata) => Some(metadata),
            LookupOutcome::NoMatch | LookupOutcome::Exhausted | LookupOutcome::Failed => None,
        }
    }
}

/// Original catalog fields plus the provider field set, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRow<M> {
    pub original_track_name: String,
    pub original_artist_name: String,
    pub metadata: Option<M>,
}

impl<M> EnrichedRow<M> {
    pub fn merge(row: &CatalogRow, outcome: LookupOutcome<M>) -> Self {
        Self {
            original_track_name: row.track_name.clone(),
            original_artist_name: row.artist_name.clone(),
            metadata: outcome.into_metadata(),
        }
    }
}

/// One provider pipeline: how to query it and how to resolve a row.
#[async_trait::async_trait]
pub trait RowLookup: Send {
    type Metadata: MetadataRecord + Send;

    fn provider_name(&self) -> &'static str;

    fn build_query(&self, row: &CatalogRow) -> SearchQuery;

    async fn lookup(&mut self, query: &SearchQuery) -> LookupOutcome<Self::Metadata>;
}

/// Spotify pipeline: a single credential set, no retries.
pub struct SpotifyLookup<P> {
    provider: P,
}

impl<P> SpotifyLookup<P>
where
    P: SearchProvider<Item = SpotifyTrack>,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P> RowLookup for SpotifyLookup<P>
where
    P: SearchProvider<Item = SpotifyTrack>,
{
    type Metadata = SpotifyMetadata;

    fn provider_name(&self) -> &'static str {
        "Spotify"
    }

    fn build_query(&self, row: &CatalogRow) -> SearchQuery {
        spotify_track_query(row)
    }

    async fn lookup(&mut self, query: &SearchQuery) -> LookupOutcome<SpotifyMetadata> {
        match self.provider.search(query).await {
            Ok(items) => LookupOutcome::from_first(items, SpotifyMetadata::from_track),
            Err(e) => {
                warn!("Error searching Spotify for '{}': {}", query.text, e);
                LookupOutcome::Failed
            }
        }
    }
}

/// YouTube pipeline: searches through a rotating API key pool.
pub struct YoutubeLookup<C> {
    rotator: CredentialRotator<C>,
}

impl<C> YoutubeLookup<C>
where
    C: SearchProvider<Item = YoutubeVideo>,
{
    pub fn new(rotator: CredentialRotator<C>) -> Self {
        Self { rotator }
    }

    pub fn rotator(&self) -> &CredentialRotator<C> {
        &self.rotator
    }
}

#[async_trait::async_trait]
impl<C> RowLookup for YoutubeLookup<C>
where
    C: SearchProvider<Item = YoutubeVideo>,
{
    type Metadata = YoutubeMetadata;

    fn provider_name(&self) -> &'static str {
        "YouTube"
    }

    fn build_query(&self, row: &CatalogRow) -> SearchQuery {
        youtube_video_query(row)
    }

    async fn lookup(&mut self, query: &SearchQuery) -> LookupOutcome<YoutubeMetadata> {
        match self.rotator.search(query).await {
            Ok(items) => LookupOutcome::from_first(items, |video| Some(YoutubeMetadata::from(video))),
            Err(RotationError::AllCredentialsExhausted { attempts }) => {
                warn!("All {} YouTube API keys exhausted for '{}'", attempts, query.text);
                LookupOutcome::Exhausted
            }
            Err(RotationError::Provider(e)) => {
                warn!("YouTube API error for '{}': {}", query.text, e);
                LookupOutcome::Failed
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub no_match: usize,
    pub exhausted: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record<M>(&mut self, outcome: &LookupOutcome<M>) {
        self.total += 1;
        match outcome {
            LookupOutcome::Matched(_) => self.matched += 1,
            LookupOutcome::NoMatch => self.no_match += 1,
            LookupOutcome::Exhausted => self.exhausted += 1,
            LookupOutcome::Failed => self.failed += 1,
        }
    }

    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.matched as f64 / self.total as f64) * 100.0
    }
}

/// Look up every row in order and accumulate one output row per input row.
pub async fn run_batch<L: RowLookup>(
    lookup: &mut L,
    rows: &[CatalogRow],
    progress: &ProgressBar,
) -> (Vec<EnrichedRow<L::Metadata>>, BatchSummary) {
    let provider = lookup.provider_name();
    info!("Starting {} lookups for {} rows", provider, rows.len());

    let mut results = Vec::with_capacity(rows.len());
    let mut summary = BatchSummary::default();

    for row in rows {
        progress.set_message(format!("{} - {}", row.artist_name, row.track_name));
        debug!("Processing track on {}: {} by {}", provider, row.track_name, row.artist_name);

        let query = lookup.build_query(row);
        let outcome = lookup.lookup(&query).await;

        summary.record(&outcome);
        results.push(EnrichedRow::merge(row, outcome));
        progress.inc(1);
    }

    info!(
        "{} lookups finished: {} matched, {} without match, {} with exhausted keys, {} failed",
        provider, summary.matched, summary.no_match, summary.exhausted, summary.failed
    );

    (results, summary)
}
