//! Local fallback search over an already-fetched article set.
//!
//! When remote keyword search fails or returns nothing, the application
//! degrades to this best-effort relevance ranking over a latest-news
//! snapshot instead of surfacing an error. The only contract is that
//! articles matching more (or stronger) query tokens sort earlier; this is
//! not a ranked-retrieval algorithm with precision/recall guarantees.

use crate::models::Article;
use tracing::debug;

/// Extra weight for a token that appears in the title specifically.
const TITLE_BONUS: usize = 2;

/// How many latest articles the fallback ranks over.
pub const FALLBACK_SNAPSHOT_SIZE: usize = 100;

/// Split a query on whitespace, discard single-character tokens, lowercase.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_lowercase)
        .collect()
}

/// The text a token is matched against: title, description, snippet,
/// keywords, and source, lowercased.
fn searchable_text(article: &Article) -> String {
    format!(
        "{} {} {} {} {}",
        article.title, article.description, article.snippet, article.keywords, article.source
    )
    .to_lowercase()
}

/// Rank `articles` against `query` and return the best `limit` matches.
///
/// An article is kept when at least one token appears as a substring of its
/// searchable text. Each token contributes its occurrence count, plus
/// [`TITLE_BONUS`] when it appears in the title. The sort is descending by
/// score and stable: equal-scored articles keep their original relative
/// order.
pub fn rank_articles(articles: &[Article], query: &str, limit: usize) -> Vec<Article> {
    let tokens = tokenize_query(query);
    if tokens.is_empty() {
        debug!(%query, "No usable tokens in query");
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Article)> = articles
        .iter()
        .filter_map(|article| {
            let text = searchable_text(article);
            let title = article.title.to_lowercase();
            let mut score = 0usize;
            for token in &tokens {
                score += text.matches(token.as_str()).count();
                if title.contains(token.as_str()) {
                    score += TITLE_BONUS;
                }
            }
            (score > 0).then_some((score, article))
        })
        .collect();

    // sort_by is stable, so ties preserve snapshot order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    debug!(
        matched = scored.len(),
        total = articles.len(),
        "Ranked fallback search candidates"
    );

    scored
        .into_iter()
        .take(limit)
        .map(|(_, article)| article.clone())
        .collect()
}
