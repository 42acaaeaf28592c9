//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRICKLY_PEAR_FEED_URL` - Product feed URL (validated as a URL)
//!
//! ## Optional
//! - `PRICKLY_PEAR_DATA_DIR` - Directory for persisted state
//!   (default: `.prickly-pear`)
//! - `PRICKLY_PEAR_FEED_TOKEN` - Private access token sent with feed requests

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default directory for persisted state, relative to the working directory.
const DEFAULT_DATA_DIR: &str = ".prickly-pear";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
///
/// Implements `Debug` manually to redact the feed token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Product feed URL.
    pub feed_url: String,
    /// Directory for persisted state (cart storage).
    pub data_dir: PathBuf,
    /// Optional private access token for the feed.
    pub feed_token: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("feed_url", &self.feed_url)
            .field("data_dir", &self.data_dir)
            .field(
                "feed_token",
                &self.feed_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration directly (hosts and tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `feed_url` is not a valid URL.
    pub fn new(feed_url: &str, data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let feed_url = validate_url("feed_url", feed_url)?;
        Ok(Self {
            feed_url,
            data_dir: data_dir.into(),
            feed_token: None,
        })
    }

    /// Attach a private feed access token.
    #[must_use]
    pub fn with_feed_token(mut self, token: SecretString) -> Self {
        self.feed_token = Some(token);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let feed_url = get_required_env("PRICKLY_PEAR_FEED_URL")?;
        let feed_url = validate_url("PRICKLY_PEAR_FEED_URL", &feed_url)?;
        let data_dir = get_env_or_default("PRICKLY_PEAR_DATA_DIR", DEFAULT_DATA_DIR);
        let feed_token = get_optional_env("PRICKLY_PEAR_FEED_TOKEN").map(SecretString::from);

        Ok(Self {
            feed_url,
            data_dir: PathBuf::from(data_dir),
            feed_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a URL, returning it unchanged when parseable.
fn validate_url(name: &str, value: &str) -> Result<String, ConfigError> {
    Url::parse(value)
        .map_err(|err| ConfigError::InvalidEnvVar(name.to_string(), err.to_string()))?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_new_validates_url() {
        assert!(ClientConfig::new("https://example.com/feed.json", "/tmp/data").is_ok());
        assert!(ClientConfig::new("not a url", "/tmp/data").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://example.com/feed.json", "/tmp/data")
            .unwrap()
            .with_feed_token(SecretString::from("super-secret".to_string()));

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
        // The token itself is still reachable for request building.
        assert_eq!(
            config.feed_token.as_ref().unwrap().expose_secret(),
            "super-secret"
        );
    }
}
