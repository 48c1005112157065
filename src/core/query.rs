//! Provider-specific search queries built from a catalog row.
//!
//! Builders do no validation: the loader has already dropped rows with an
//! empty title or artist.

use crate::core::catalog::CatalogRow;

/// Content type filter sent with a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Video,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Video => "video",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: u32,
    pub kind: SearchKind,
}

/// Only the best-ranked candidate is ever used.
pub const CANDIDATE_LIMIT: u32 = 1;

/// Field-qualified catalog query: `track:<title> artist:<artist>`
pub fn spotify_track_query(row: &CatalogRow) -> SearchQuery {
    SearchQuery {
        text: format!("track:{} artist:{}", row.track_name, row.artist_name),
        limit: CANDIDATE_LIMIT,
        kind: SearchKind::Track,
    }
}

/// Free-text video query: `<title> <artist>`
pub fn youtube_video_query(row: &CatalogRow) -> SearchQuery {
    SearchQuery {
        text: format!("{} {}", row.track_name, row.artist_name),
        limit: CANDIDATE_LIMIT,
        kind: SearchKind::Video,
    }
}
