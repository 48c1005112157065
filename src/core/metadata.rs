//! Fixed field sets extracted from a provider's best-matching item.

use crate::core::services::{SpotifyTrack, YoutubeVideo};

/// Placeholder written for optional provider fields that are absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// A complete provider field set that can be written as output columns.
pub trait MetadataRecord {
    /// Output column names, in write order
    const COLUMNS: &'static [&'static str];

    /// Cell values, aligned with `COLUMNS`
    fn values(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyMetadata {
    pub spotify_track_id: String,
    pub isrc: String,
    pub spotify_track_name: String,
    pub spotify_artist_name: String,
    pub album_name: String,
    pub release_date: String,
}

impl SpotifyMetadata {
    /// `None` when the track lists no artist, which leaves the field set
    /// incomplete.
    pub fn from_track(track: SpotifyTrack) -> Option<Self> {
        let artist = track.artists.into_iter().next()?;

        Some(Self {
            spotify_track_id: track.id,
            isrc: track.external_ids.isrc.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            spotify_track_name: track.name,
            spotify_artist_name: artist.name,
            album_name: track.album.name,
            release_date: track.album.release_date,
        })
    }
}

impl MetadataRecord for SpotifyMetadata {
    const COLUMNS: &'static [&'static str] = &[
        "spotify_track_id",
        "isrc",
        "spotify_track_name",
        "spotify_artist_name",
        "album_name",
        "release_date",
    ];

    fn values(&self) -> Vec<&str> {
        vec![
            self.spotify_track_id.as_str(),
            self.isrc.as_str(),
            self.spotify_track_name.as_str(),
            self.spotify_artist_name.as_str(),
            self.album_name.as_str(),
            self.release_date.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeMetadata {
    pub youtube_video_id: String,
    pub youtube_title: String,
    pub youtube_description: String,
    pub youtube_channel_title: String,
    pub youtube_publish_date: String,
}

impl From<YoutubeVideo> for YoutubeMetadata {
    fn from(video: YoutubeVideo) -> Self {
        let snippet = video.snippet;
        Self {
            youtube_video_id: video.id.video_id,
            youtube_title: snippet.title,
            youtube_description: snippet.description.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            youtube_channel_title: snippet.channel_title,
            youtube_publish_date: snippet.published_at,
        }
    }
}

impl MetadataRecord for YoutubeMetadata {
    const COLUMNS: &'static [&'static str] = &[
        "youtube_video_id",
        "youtube_title",
        "youtube_description",
        "youtube_channel_title",
        "youtube_publish_date",
    ];

    fn values(&self) -> Vec<&str> {
        vec![
            self.youtube_video_id.as_str(),
            self.youtube_title.as_str(),
            self.youtube_description.as_str(),
            self.youtube_channel_title.as_str(),
            self.youtube_publish_date.as_str(),
        ]
    }
}
