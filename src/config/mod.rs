use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::debug;

use crate::error::{ConfigError, Result};

pub mod credentials;
pub mod env;
pub mod validation;

pub use credentials::{ApiKey, SpotifyCredentials};
use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

fn default_request_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Song catalog CSV
    pub input_path: PathBuf,

    /// Header of the catalog column holding the song title
    pub title_column: String,

    /// Header of the catalog column holding the original artist
    pub artist_column: String,

    /// Output CSV for the Spotify pass
    pub spotify_output: PathBuf,

    /// Output CSV for the YouTube pass
    pub youtube_output: PathBuf,

    /// Spotify Web API base URL
    pub spotify_api_url: String,

    /// Spotify accounts service base URL (token endpoint)
    pub spotify_auth_url: String,

    /// YouTube Data API base URL
    pub youtube_api_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("song_catalog.csv"),
            title_column: "SONG TITLE".to_string(),
            artist_column: "ORIGINAL ARTIST".to_string(),
            spotify_output: PathBuf::from("spotify_metadata.csv"),
            youtube_output: PathBuf::from("youtube_metadata.csv"),
            spotify_api_url: "https://api.spotify.com".to_string(),
            spotify_auth_url: "https://accounts.spotify.com".to_string(),
            youtube_api_url: "https://www.googleapis.com".to_string(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `CATALOG_ENRICH_*` variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up credentials and overrides from a local .env if present
        dotenvy::dotenv().ok();

        let mut config = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(path) = EnvParser::parse_path(EnvVars::INPUT_PATH)? {
            self.input_path = path;
        }

        if let Some(column) = EnvParser::parse_string(EnvVars::TITLE_COLUMN, None)? {
            self.title_column = column;
        }

        if let Some(column) = EnvParser::parse_string(EnvVars::ARTIST_COLUMN, None)? {
            self.artist_column = column;
        }

        if let Some(path) = EnvParser::parse_path(EnvVars::SPOTIFY_OUTPUT)? {
            self.spotify_output = path;
        }

        if let Some(path) = EnvParser::parse_path(EnvVars::YOUTUBE_OUTPUT)? {
            self.youtube_output = path;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::SPOTIFY_API_URL, Some(validate_env_url))? {
            self.spotify_api_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::SPOTIFY_AUTH_URL, Some(validate_env_url))? {
            self.spotify_auth_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::YOUTUBE_API_URL, Some(validate_env_url))? {
            self.youtube_api_url = url;
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECONDS, 1, 300)? {
            self.request_timeout_seconds = timeout;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_column(&self.title_column, "title_column")?;
        ConfigValidator::validate_column(&self.artist_column, "artist_column")?;
        ConfigValidator::validate_url(&self.spotify_api_url, "Spotify API")?;
        ConfigValidator::validate_url(&self.spotify_auth_url, "Spotify accounts")?;
        ConfigValidator::validate_url(&self.youtube_api_url, "YouTube API")?;
        ConfigValidator::validate_range(self.request_timeout_seconds, 1, 300, "request_timeout_seconds")?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "catalog-enrich", "catalog-enrich")
            .ok_or(ConfigError::ProjectDirs)?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    /// Keys accepted in the TOML file, in display order
    pub fn keys() -> &'static [&'static str] {
        &[
            "input_path",
            "title_column",
            "artist_column",
            "spotify_output",
            "youtube_output",
            "spotify_api_url",
            "spotify_auth_url",
            "youtube_api_url",
            "request_timeout_seconds",
        ]
    }
}

/// Endpoint overrides from the environment must be http(s) URLs.
fn validate_env_url(url: &str) -> Result<()> {
    ConfigValidator::validate_url(url, "endpoint override")
}
