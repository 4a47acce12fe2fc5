//! Data models for news articles.
//!
//! This module defines [`Article`], the canonical in-memory representation
//! every other part of the application depends on. The upstream provider
//! returns articles in several different shapes depending on the endpoint
//! and query parameters; the normalizer (see [`crate::normalize`]) maps each
//! raw record into this one stable form exactly once, and the value is never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// A normalized news article.
///
/// Constructed only by [`crate::normalize::transform_article`]. Fields that
/// the upstream omits are filled with documented placeholders rather than
/// left as options, so rendering code never has to re-check presence.
///
/// # Identity
///
/// `id` is always non-empty: it is taken from the upstream `uri`/`id`/`uuid`
/// when available, otherwise generated from the current time plus a random
/// fraction. Generated ids are unique within a batch but not stable across
/// refetches of the same underlying article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier; never empty.
    pub id: String,
    /// Headline; `"Untitled"` when the upstream has none.
    pub title: String,
    /// Best-effort long text from body/description/summary; may be empty.
    pub description: String,
    /// Comma-separated keyword string; may be empty.
    pub keywords: String,
    /// First 300 characters of the body (or description); may be empty.
    pub snippet: String,
    /// Link to the full article; `"#"` when the upstream has none.
    pub url: String,
    /// Image URL; may be empty or reference an unreachable resource.
    /// Validity is not checked by this layer.
    pub image_url: String,
    /// ISO language code, defaulting to `"eng"`.
    pub language: String,
    /// ISO-8601 publish timestamp. Defaults to the time of normalization
    /// when the upstream omits it, at which point the true publish time
    /// is unrecoverable.
    pub published_at: String,
    /// Publisher name; `"Unknown Source"` when absent.
    pub source: String,
    /// Category labels in upstream order; possibly empty.
    pub categories: Vec<String>,
    /// Provider relevance score, `>= 0`; `0` when the upstream sends none.
    pub relevance_score: f64,
    /// The upstream's raw identifier, kept so identifier lookups can match
    /// records whose `id` had to be generated locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
