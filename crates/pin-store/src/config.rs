//! Store Configuration
//!
//! Project URL and anon key of the hosted Supabase project.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid project URL: {0}")]
    InvalidUrl(String),
}

/// Connection settings for the hosted project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project base URL, without trailing slash
    pub url: String,
    /// Public anon key, sent as `apikey` on every request
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_URL"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }
        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Build from optional env values, e.g. `option_env!` at the call site
    pub fn from_env_values(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url.ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let anon_key = anon_key.ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        Self::new(url, anon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = StoreConfig::new("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(
            StoreConfig::from_env_values(None, Some("k")),
            Err(ConfigError::Missing("SUPABASE_URL"))
        );
        assert_eq!(
            StoreConfig::from_env_values(Some("https://x.supabase.co"), Some("  ")),
            Err(ConfigError::Missing("SUPABASE_ANON_KEY"))
        );
    }

    #[test]
    fn test_url_needs_scheme() {
        assert!(matches!(
            StoreConfig::new("abc.supabase.co", "key"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
