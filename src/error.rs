//! Error handling for the catalog-enrich application
//!
//! Two layers of errors live here. `EnrichError` is the fatal, run-level
//! hierarchy: anything that surfaces through it stops the batch. `LookupError`
//! is the per-row provider taxonomy; it never leaves the lookup stage, where it
//! is normalized into a `LookupOutcome`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP client could not be built: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Missing credential: {name}")]
    MissingCredential { name: String },

    #[error("Project directories could not be determined")]
    ProjectDirs,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog {path} has no column named '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failure of a single provider request.
///
/// `QuotaExhausted` is the only variant the pipeline recovers from (by rotating
/// credentials). Everything else resolves the row to "no match".
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Quota exhausted for the active credential")]
    QuotaExhausted,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },
}

impl LookupError {
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, LookupError::QuotaExhausted)
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;

impl From<std::io::Error> for FileSystemError {
    fn from(err: std::io::Error) -> Self {
        FileSystemError::Io(err)
    }
}

impl From<std::io::Error> for EnrichError {
    fn from(err: std::io::Error) -> Self {
        EnrichError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<toml::de::Error> for EnrichError {
    fn from(err: toml::de::Error) -> Self {
        EnrichError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for EnrichError {
    fn from(err: toml::ser::Error) -> Self {
        EnrichError::Config(ConfigError::Serialize(err))
    }
}
