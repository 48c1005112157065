//! Provider credentials, read from the process environment.
//!
//! Secrets are never written to the config file and never printed; `Debug`
//! output is redacted.

use std::fmt;

use super::env::{EnvParser, EnvVars};
use crate::error::{ConfigError, Result};

/// Spotify client-credentials pair
#[derive(Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl SpotifyCredentials {
    pub fn from_env() -> Result<Self> {
        let client_id = EnvParser::parse_string(EnvVars::SPOTIFY_CLIENT_ID, None)?
            .ok_or_else(|| missing(EnvVars::SPOTIFY_CLIENT_ID))?;
        let client_secret = EnvParser::parse_string(EnvVars::SPOTIFY_CLIENT_SECRET, None)?
            .ok_or_else(|| missing(EnvVars::SPOTIFY_CLIENT_SECRET))?;

        Ok(Self { client_id, client_secret })
    }

    pub fn is_configured() -> bool {
        EnvParser::is_present(EnvVars::SPOTIFY_CLIENT_ID) && EnvParser::is_present(EnvVars::SPOTIFY_CLIENT_SECRET)
    }
}

/// Opaque YouTube Data API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "ApiKey({}…)", visible)
    }
}

/// Ordered YouTube key pool from the environment.
///
/// Numbered variables come first (`YOUTUBE_API_KEY_1`, `_2`, … until the first
/// gap), followed by any comma-separated keys in `YOUTUBE_API_KEYS`. Duplicates
/// are dropped, keeping the first occurrence.
pub fn youtube_keys_from_env() -> Result<Vec<ApiKey>> {
    let keys = collect_youtube_keys(|name| EnvParser::parse_string(name, None).ok().flatten());
    if keys.is_empty() {
        return Err(missing(&format!("{}1", EnvVars::YOUTUBE_API_KEY_PREFIX)));
    }
    Ok(keys)
}

fn collect_youtube_keys<F>(lookup: F) -> Vec<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    let mut keys: Vec<ApiKey> = Vec::new();

    let mut push = |raw: &str| {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        let key = ApiKey::new(raw);
        if !keys.contains(&key) {
            keys.push(key);
        }
    };

    let mut index = 1;
    while let Some(value) = lookup(&format!("{}{}", EnvVars::YOUTUBE_API_KEY_PREFIX, index)) {
        push(&value);
        index += 1;
    }

    if let Some(list) = lookup(EnvVars::YOUTUBE_API_KEYS) {
        for raw in list.split(',') {
            push(raw);
        }
    }

    keys
}

fn missing(name: &str) -> crate::error::EnrichError {
    ConfigError::MissingCredential { name: name.to_string() }.into()
}
