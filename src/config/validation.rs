use url::Url;
use crate::error::{Result, EnrichError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an HTTP(S) base URL
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            EnrichError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(EnrichError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }

        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(EnrichError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate a catalog column name
    pub fn validate_column(name: &str, field_name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(EnrichError::Validation(format!("{} must not be empty", field_name)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("https://api.spotify.com", "Spotify API").is_ok());
        assert!(ConfigValidator::validate_url("http://localhost:8080", "YouTube API").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "Spotify API").is_err());
        assert!(ConfigValidator::validate_url("ftp://example.com", "Spotify API").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(ConfigValidator::validate_range(5u64, 1u64, 10u64, "test").is_ok());
        assert!(ConfigValidator::validate_range(15u64, 1u64, 10u64, "test").is_err());
        assert!(ConfigValidator::validate_range(0u64, 1u64, 10u64, "test").is_err());
    }

    #[test]
    fn test_validate_column() {
        assert!(ConfigValidator::validate_column("SONG TITLE", "title_column").is_ok());
        assert!(ConfigValidator::validate_column("  ", "title_column").is_err());
    }
}
