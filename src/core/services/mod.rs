//! External services integration
//!
//! - `spotify`: Spotify Web API track search (client-credentials auth)
//! - `youtube`: YouTube Data API v3 video search (API key auth)

use std::time::Duration;

use crate::core::query::SearchQuery;
use crate::error::{LookupError, NetworkError};

pub mod spotify;
pub mod youtube;

#[cfg(test)]
mod stub_server;

pub use spotify::{SpotifyClient, SpotifyTrack};
pub use youtube::{YoutubeClient, YoutubeVideo};

/// One bounded search request against a metadata provider.
///
/// Implementations return the ranked items as-is (possibly empty) or a typed
/// `LookupError`. They never retry.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    type Item: Send;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Self::Item>, LookupError>;
}

pub fn build_http_client(timeout_seconds: u64) -> Result<reqwest::Client, NetworkError> {
    let version = env!("CARGO_PKG_VERSION");
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(format!("catalog-enrich/{}", version))
        .build()
        .map_err(NetworkError::Client)
}
