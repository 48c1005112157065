use reqwest::StatusCode;
use serde::Deserialize;

use super::SearchProvider;
use crate::config::ApiKey;
use crate::core::query::SearchQuery;
use crate::error::LookupError;

/// Error reasons that mean the key's quota (daily or per-window) is used up.
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Error reasons that mean the key itself is unusable.
const AUTH_REASONS: &[&str] = &["keyInvalid", "keyExpired", "accessNotConfigured", "forbidden"];

#[derive(Deserialize, Debug, Clone)]
pub struct YoutubeVideo {
    pub id: VideoId,
    pub snippet: Snippet,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VideoId {
    pub video_id: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub description: Option<String>,
    pub channel_title: String,
    pub published_at: String,
}

#[derive(Deserialize, Debug)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<YoutubeVideo>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    reason: Option<String>,
}

/// YouTube Data API v3 search client bound to a single API key.
///
/// Instances are cheap: the underlying `reqwest::Client` is shared, so the
/// credential rotator builds a fresh one for every key switch.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    api_url: String,
    key: ApiKey,
}

impl YoutubeClient {
    pub fn new(http: reqwest::Client, api_url: &str, key: ApiKey) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            key,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for YoutubeClient {
    type Item = YoutubeVideo;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<YoutubeVideo>, LookupError> {
        let limit = query.limit.to_string();

        let response = self.http
            .get(format!("{}/youtube/v3/search", self.api_url))
            .query(&[
                ("part", "snippet"),
                ("q", query.text.as_str()),
                ("maxResults", limit.as_str()),
                ("type", query.kind.as_str()),
                ("key", self.key.expose()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        parse_search_response(&body)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<YoutubeVideo>, LookupError> {
    let parsed: SearchListResponse = serde_json::from_str(body).map_err(|e| {
        LookupError::InvalidResponse { reason: format!("search response: {}", e) }
    })?;
    Ok(parsed.items)
}

/// Turn a non-2xx response into a typed error using the structured
/// `error.errors[].reason` field of the Google API error body.
fn classify_error(status: StatusCode, body: &str) -> LookupError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let reasons: Vec<&str> = envelope
        .as_ref()
        .map(|e| e.error.errors.iter().filter_map(|d| d.reason.as_deref()).collect())
        .unwrap_or_default();

    if reasons.iter().any(|r| QUOTA_REASONS.contains(r)) {
        return LookupError::QuotaExhausted;
    }

    let message = envelope
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    if reasons.iter().any(|r| AUTH_REASONS.contains(r)) || status == StatusCode::UNAUTHORIZED {
        return LookupError::Authentication { reason: message };
    }

    LookupError::Status {
        status: status.as_u16(),
        reason: message,
    }
}
