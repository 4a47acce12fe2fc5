//! Error types for the news data-access layer.
//!
//! The taxonomy mirrors how failures propagate: transport and HTTP-status
//! failures surface to callers of the plain latest-news path, while the
//! search path absorbs them and degrades to the local fallback ranking.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No API key was found in the config file, CLI flag, or environment.
    /// The client refuses to initialize rather than making unauthenticated calls.
    #[error("missing API key: set NEWS_API_KEY or add api_key to the config file")]
    MissingApiKey,

    /// Network-level failure: connect error, timeout, TLS, etc.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("news API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
