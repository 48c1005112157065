use std::env;
use std::path::PathBuf;
use crate::error::{Result, EnrichError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const INPUT_PATH: &'static str = "CATALOG_ENRICH_INPUT_PATH";
    pub const TITLE_COLUMN: &'static str = "CATALOG_ENRICH_TITLE_COLUMN";
    pub const ARTIST_COLUMN: &'static str = "CATALOG_ENRICH_ARTIST_COLUMN";
    pub const SPOTIFY_OUTPUT: &'static str = "CATALOG_ENRICH_SPOTIFY_OUTPUT";
    pub const YOUTUBE_OUTPUT: &'static str = "CATALOG_ENRICH_YOUTUBE_OUTPUT";
    pub const SPOTIFY_API_URL: &'static str = "CATALOG_ENRICH_SPOTIFY_API_URL";
    pub const SPOTIFY_AUTH_URL: &'static str = "CATALOG_ENRICH_SPOTIFY_AUTH_URL";
    pub const YOUTUBE_API_URL: &'static str = "CATALOG_ENRICH_YOUTUBE_API_URL";
    pub const REQUEST_TIMEOUT_SECONDS: &'static str = "CATALOG_ENRICH_REQUEST_TIMEOUT_SECONDS";

    // Provider credentials
    pub const SPOTIFY_CLIENT_ID: &'static str = "SPOTIFY_CLIENT_ID";
    pub const SPOTIFY_CLIENT_SECRET: &'static str = "SPOTIFY_CLIENT_SECRET";
    pub const YOUTUBE_API_KEY_PREFIX: &'static str = "YOUTUBE_API_KEY_";
    pub const YOUTUBE_API_KEYS: &'static str = "YOUTUBE_API_KEYS";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(EnrichError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as PathBuf
    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name, None)?.map(PathBuf::from))
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                EnrichError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(EnrichError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Check if environment variable is present and non-empty
    pub fn is_present(var_name: &str) -> bool {
        env::var(var_name).map(|v| !v.trim().is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_string_trims_and_skips_blank() {
        env::set_var("TEST_CE_STRING_VALUE", "  hello  ");
        env::set_var("TEST_CE_STRING_BLANK", "   ");

        assert_eq!(EnvParser::parse_string("TEST_CE_STRING_VALUE", None).unwrap(), Some("hello".to_string()));
        assert_eq!(EnvParser::parse_string("TEST_CE_STRING_BLANK", None).unwrap(), None);
        assert_eq!(EnvParser::parse_string("TEST_CE_STRING_NOT_SET", None).unwrap(), None);

        env::remove_var("TEST_CE_STRING_VALUE");
        env::remove_var("TEST_CE_STRING_BLANK");
    }

    #[test]
    fn test_parse_string_runs_validator() {
        fn https_only(value: &str) -> Result<()> {
            if value.starts_with("https://") {
                Ok(())
            } else {
                Err(EnrichError::Validation(format!("not https: {}", value)))
            }
        }

        env::set_var("TEST_CE_URL_GOOD", "https://api.spotify.com");
        env::set_var("TEST_CE_URL_BAD", "ftp://api.spotify.com");

        assert_eq!(
            EnvParser::parse_string("TEST_CE_URL_GOOD", Some(https_only)).unwrap(),
            Some("https://api.spotify.com".to_string())
        );
        assert!(EnvParser::parse_string("TEST_CE_URL_BAD", Some(https_only)).is_err());
        assert_eq!(EnvParser::parse_string("TEST_CE_URL_NOT_SET", Some(https_only)).unwrap(), None);

        env::remove_var("TEST_CE_URL_GOOD");
        env::remove_var("TEST_CE_URL_BAD");
    }

    #[test]
    fn test_parse_u64() {
        env::set_var("TEST_CE_U64_VALID", "42");
        env::set_var("TEST_CE_U64_OUT_OF_RANGE", "150");
        env::set_var("TEST_CE_U64_INVALID", "not_a_number");

        assert_eq!(EnvParser::parse_u64("TEST_CE_U64_VALID", 1, 100).unwrap(), Some(42));
        assert!(EnvParser::parse_u64("TEST_CE_U64_OUT_OF_RANGE", 1, 100).is_err());
        assert!(EnvParser::parse_u64("TEST_CE_U64_INVALID", 1, 100).is_err());
        assert_eq!(EnvParser::parse_u64("TEST_CE_U64_NOT_SET", 1, 100).unwrap(), None);

        env::remove_var("TEST_CE_U64_VALID");
        env::remove_var("TEST_CE_U64_OUT_OF_RANGE");
        env::remove_var("TEST_CE_U64_INVALID");
    }
}
