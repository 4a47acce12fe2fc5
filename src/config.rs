//! Configuration loading and validation.
//!
//! Settings come from an optional YAML config file, with the API key also
//! accepted from the CLI/environment (`NEWS_API_KEY`), which takes
//! precedence over the file. A missing API key is a fatal startup
//! condition: the client refuses to initialize rather than making
//! unauthenticated calls.

use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::{debug, info};

fn default_endpoint() -> String {
    "https://newsapi.ai/api/v1/article/getArticles".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Runtime configuration for the news client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Provider API key. Required; see [`Config::load`].
    #[serde(default)]
    pub api_key: String,

    /// The provider's `getArticles` POST endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout, applied to every fetch through the shared client.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file, then apply the
    /// API-key override (CLI flag or `NEWS_API_KEY` environment variable).
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when no API key is
    /// present after merging.
    pub fn load(path: Option<&str>, api_key_override: Option<String>) -> Result<Config> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&raw)?;
                info!(path, "Loaded configuration");
                config
            }
            None => {
                debug!("No config file given; using defaults");
                Config::default()
            }
        };

        if let Some(key) = api_key_override.filter(|k| !k.is_empty()) {
            config.api_key = key;
        }

        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        if config.endpoint.is_empty() {
            return Err(Error::Config("endpoint must not be empty".to_string()));
        }

        Ok(config)
    }
}
