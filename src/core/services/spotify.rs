use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::SearchProvider;
use crate::config::SpotifyCredentials;
use crate::core::query::SearchQuery;
use crate::error::LookupError;

/// Tokens are refreshed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Deserialize, Debug, Clone)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpotifyAlbum {
    pub name: String,
    pub release_date: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ExternalIds {
    pub isrc: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Deserialize, Debug)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        let lifetime = (response.expires_in - TOKEN_EXPIRY_MARGIN_SECONDS).max(0);
        Self {
            value: response.access_token,
            expires_at: now + ChronoDuration::seconds(lifetime),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Spotify Web API client using the client-credentials flow.
///
/// The bearer token is fetched lazily and cached until shortly before it
/// expires. A 401 from the search endpoint drops the cached token so the next
/// row authenticates again.
pub struct SpotifyClient {
    http: reqwest::Client,
    api_url: String,
    auth_url: String,
    credentials: SpotifyCredentials,
    token: RwLock<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, api_url: &str, auth_url: &str, credentials: SpotifyCredentials) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
            credentials,
            token: RwLock::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, LookupError> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref() {
                if token.is_fresh(Utc::now()) {
                    return Ok(token.value.clone());
                }
            }
        }

        debug!("Requesting Spotify access token");
        let response = self.http
            .post(format!("{}/api/token", self.auth_url))
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Authentication {
                reason: format!("token request returned {}: {}", status, body.trim()),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            LookupError::InvalidResponse { reason: format!("token response: {}", e) }
        })?;

        let token = AccessToken::from_response(token_response, Utc::now());
        let value = token.value.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait::async_trait]
impl SearchProvider for SpotifyClient {
    type Item = SpotifyTrack;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SpotifyTrack>, LookupError> {
        let token = self.access_token().await?;
        let limit = query.limit.to_string();

        let response = self.http
            .get(format!("{}/v1/search", self.api_url))
            .bearer_auth(&token)
            .query(&[
                ("q", query.text.as_str()),
                ("type", query.kind.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Authentication { reason: error_message(status, &body) });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                reason: error_message(status, &body),
            });
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<SpotifyTrack>, LookupError> {
    let parsed: SearchResponse = serde_json::from_str(body).map_err(|e| {
        LookupError::InvalidResponse { reason: format!("search response: {}", e) }
    })?;
    Ok(parsed.tracks.items)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
