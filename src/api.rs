//! News provider API interaction.
//!
//! This module talks to the provider's single `getArticles` POST endpoint
//! and turns its inconsistent responses into canonical [`Article`] lists.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`ArticleSource`]: core trait for fetching latest and searched articles
//! - [`NewsClient`]: the real HTTP implementation over `reqwest`
//! - [`search_with_fallback`] / [`lookup_article`]: policies written against
//!   the trait, so the degradation paths are testable without a network
//!
//! # Failure policy
//!
//! The plain latest-news path propagates transport and HTTP failures to the
//! caller. The search path never fails outward: any failure, or an empty
//! remote result, triggers a local relevance-ranked fallback over a
//! latest-news snapshot, and a total failure yields an empty list.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Article;
use crate::normalize::{transform_article, unwrap_articles};
use crate::search::{FALLBACK_SNAPSHOT_SIZE, rank_articles};
use crate::utils::truncate_for_log;
use reqwest::header::CACHE_CONTROL;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Remote search result counts are capped to bound memory and latency.
const MAX_SEARCH_COUNT: usize = 50;

/// How many latest articles an identifier lookup scans.
const LOOKUP_SNAPSHOT_SIZE: usize = 100;

/// Body length requested per article, matching the provider's default UI feed.
const ARTICLE_BODY_LEN: u32 = 1000;

/// Freshness hints forwarded to intermediaries: latest headlines may be a
/// couple of minutes stale, searches always want fresh data.
const LATEST_FRESHNESS: &str = "max-age=120";
const SEARCH_FRESHNESS: &str = "no-store";

/// Concept set the latest-news feed is restricted to.
const LATEST_CONCEPT_URIS: [&str; 3] = [
    "http://en.wikipedia.org/wiki/Politics",
    "http://en.wikipedia.org/wiki/Technology",
    "http://en.wikipedia.org/wiki/Business",
];

/// Trait for fetching article sets from a provider.
///
/// Implementors return normalized [`Article`] lists. The degradation
/// policies ([`search_with_fallback`], [`lookup_article`]) are generic over
/// this trait so their failure handling can be exercised with test doubles.
pub trait ArticleSource {
    /// Latest articles, newest first, up to `limit`.
    async fn latest(&self, limit: usize) -> Result<Vec<Article>>;

    /// Remote keyword search, relevance-sorted, up to `limit`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>>;
}

/// HTTP client for the news-search provider.
#[derive(Debug)]
pub struct NewsClient {
    http: reqwest::Client,
    config: Config,
}

impl NewsClient {
    /// Build a client from validated configuration.
    ///
    /// Refuses to initialize without an API key; the client never makes
    /// unauthenticated calls.
    pub fn new(config: Config) -> Result<NewsClient> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(NewsClient { http, config })
    }

    /// Fetch the latest English-language articles for the fixed concept set,
    /// sorted by publish date descending.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses, and undecodable bodies all
    /// propagate; this path has no fallback.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_latest_news(&self, limit: usize) -> Result<Vec<Article>> {
        let body = self.latest_request_body(limit);
        let articles = self.post_articles(&body, LATEST_FRESHNESS).await?;
        info!(count = articles.len(), "Fetched latest news");
        Ok(articles)
    }

    /// Search articles by free-text keywords.
    ///
    /// Never fails outward: remote failure or an empty remote result
    /// degrades to the local fallback ranking over a latest-news snapshot,
    /// and a total failure yields an empty list.
    #[instrument(level = "info", skip(self))]
    pub async fn search_news_by_keywords(&self, query: &str, limit: usize) -> Vec<Article> {
        search_with_fallback(self, query, limit).await
    }

    /// Resolve a single article from the latest-news snapshot by matching
    /// the identifier against `id`, the upstream `uri`, or the `url`.
    /// Returns `None` both when nothing matches and when the snapshot
    /// cannot be fetched.
    #[instrument(level = "info", skip(self))]
    pub async fn get_article_by_id(&self, id: &str) -> Option<Article> {
        lookup_article(self, id).await
    }

    fn latest_request_body(&self, limit: usize) -> Value {
        json!({
            "query": {
                "$query": {
                    "$and": [
                        { "conceptUri": { "$and": LATEST_CONCEPT_URIS } },
                        { "lang": "eng" }
                    ]
                }
            },
            "resultType": "articles",
            "articlesPage": 1,
            "articlesCount": limit,
            "articlesSortBy": "date",
            "articlesArticleBodyLen": ARTICLE_BODY_LEN,
            "apiKey": self.config.api_key,
        })
    }

    fn search_request_body(&self, query: &str, limit: usize) -> Value {
        json!({
            "query": {
                "$query": {
                    "$and": [
                        { "$or": [ { "title": query }, { "body": query } ] },
                        { "lang": "eng" }
                    ]
                }
            },
            "resultType": "articles",
            "articlesPage": 1,
            "articlesCount": limit.min(MAX_SEARCH_COUNT),
            "articlesSortBy": "rel",
            "articlesArticleBodyLen": ARTICLE_BODY_LEN,
            "apiKey": self.config.api_key,
        })
    }

    /// One POST to the provider: send the request body, check the status,
    /// decode, unwrap the envelope, normalize every raw record.
    #[instrument(level = "info", skip_all, fields(endpoint = %self.config.endpoint))]
    async fn post_articles(&self, body: &Value, freshness: &str) -> Result<Vec<Article>> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CACHE_CONTROL, freshness)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %truncate_for_log(&body_text, 300),
                "News API request failed"
            );
            return Err(Error::Status {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;
        let raw = unwrap_articles(&data);
        let articles: Vec<Article> = raw.iter().filter_map(transform_article).collect();
        if articles.len() < raw.len() {
            warn!(
                dropped = raw.len() - articles.len(),
                "Dropped malformed raw records"
            );
        }
        Ok(articles)
    }
}

impl ArticleSource for NewsClient {
    async fn latest(&self, limit: usize) -> Result<Vec<Article>> {
        self.fetch_latest_news(limit).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        let body = self.search_request_body(query, limit);
        self.post_articles(&body, SEARCH_FRESHNESS).await
    }
}

/// Remote search with graceful degradation.
///
/// Tries the remote search first; on failure or an empty result, ranks a
/// latest-news snapshot locally instead. No error escapes this function;
/// a total failure yields an empty list.
pub async fn search_with_fallback<S: ArticleSource>(
    source: &S,
    query: &str,
    limit: usize,
) -> Vec<Article> {
    match source.search(query, limit).await {
        Ok(articles) if !articles.is_empty() => articles,
        Ok(_) => {
            info!(%query, "Remote search returned no results; using local fallback");
            fallback_search(source, query, limit).await
        }
        Err(e) => {
            warn!(%query, error = %e, "Remote search failed; using local fallback");
            fallback_search(source, query, limit).await
        }
    }
}

async fn fallback_search<S: ArticleSource>(source: &S, query: &str, limit: usize) -> Vec<Article> {
    let snapshot = match source.latest(FALLBACK_SNAPSHOT_SIZE).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(%query, error = %e, "Fallback fetch failed; returning no results");
            return Vec::new();
        }
    };
    rank_articles(&snapshot, query, limit)
}

/// Find the first latest-news article whose `id` or upstream `uri` equals
/// `id`, or whose `url` contains it. Absence is a valid outcome, not an
/// error; the caller decides whether it is a 404-equivalent condition.
pub async fn lookup_article<S: ArticleSource>(source: &S, id: &str) -> Option<Article> {
    let articles = match source.latest(LOOKUP_SNAPSHOT_SIZE).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(%id, error = %e, "Lookup fetch failed");
            return None;
        }
    };
    articles
        .into_iter()
        .find(|article| {
            article.id == id || article.uri.as_deref() == Some(id) || article.url.contains(id)
        })
}
