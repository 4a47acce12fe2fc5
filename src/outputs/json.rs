//! JSON output for API-style consumption.
//!
//! Serializes normalized articles to pretty-printed JSON so results can be
//! piped into `jq` or consumed by other tooling.

use crate::error::Result;
use crate::models::Article;

/// Serialize an article list as pretty-printed JSON.
pub fn render_articles(articles: &[Article]) -> Result<String> {
    Ok(serde_json::to_string_pretty(articles)?)
}

/// Serialize a single article as pretty-printed JSON.
pub fn render_article(article: &Article) -> Result<String> {
    Ok(serde_json::to_string_pretty(article)?)
}
