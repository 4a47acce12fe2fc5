//! Normalization of raw provider records into canonical [`Article`]s.
//!
//! The upstream provider is inconsistent: the article list can be buried
//! under several different envelope shapes, and individual records rename
//! fields depending on which endpoint produced them. This module absorbs
//! both problems in one place:
//!
//! - [`unwrap_articles`] locates the raw article list inside a decoded
//!   response body, trying known envelope shapes in priority order.
//! - [`transform_article`] maps one raw record of unknown shape into an
//!   [`Article`], probing the known field aliases in a fixed order.
//!
//! # Drop policy
//!
//! A record that is not a JSON object is dropped silently; a malformed
//! entry must never abort the whole page of results. The same applies at
//! the envelope level: a response that matches no known shape is treated
//! as zero results, with a warning for diagnostics only.

use crate::models::Article;
use chrono::Utc;
use rand::{Rng, rng};
use serde_json::Value;
use tracing::{debug, warn};

/// Maximum snippet length, in characters.
const SNIPPET_LEN: usize = 300;

const UNTITLED: &str = "Untitled";
const MISSING_URL: &str = "#";
const DEFAULT_LANGUAGE: &str = "eng";
const UNKNOWN_SOURCE: &str = "Unknown Source";

type ShapeMatcher = fn(&Value) -> Option<&Vec<Value>>;

fn shape_articles_results(data: &Value) -> Option<&Vec<Value>> {
    data.get("articles")?.get("results")?.as_array()
}

fn shape_articles_list(data: &Value) -> Option<&Vec<Value>> {
    data.get("articles")?.as_array()
}

fn shape_results_list(data: &Value) -> Option<&Vec<Value>> {
    data.get("results")?.as_array()
}

fn shape_bare_list(data: &Value) -> Option<&Vec<Value>> {
    data.as_array()
}

/// Known envelope shapes, tried in priority order; first match wins.
const ENVELOPE_SHAPES: [(&str, ShapeMatcher); 4] = [
    ("articles.results", shape_articles_results),
    ("articles", shape_articles_list),
    ("results", shape_results_list),
    ("bare list", shape_bare_list),
];

/// Locate the raw article list inside a decoded response body.
///
/// Returns an empty list when no known envelope shape matches; the caller
/// treats that the same as zero results.
pub fn unwrap_articles(data: &Value) -> Vec<Value> {
    for (shape, matcher) in ENVELOPE_SHAPES {
        if let Some(list) = matcher(data) {
            debug!(shape, count = list.len(), "Unwrapped article list");
            return list.clone();
        }
    }
    warn!("Unexpected response structure; treating as zero results");
    Vec::new()
}

/// Transform one raw provider record into a canonical [`Article`].
///
/// Field aliases are probed in a fixed order (first non-empty wins),
/// mirroring the provider's per-endpoint renames. Returns `None` for
/// records that are not JSON objects; that record is skipped and the
/// rest of the batch is unaffected.
pub fn transform_article(raw: &Value) -> Option<Article> {
    if !raw.is_object() {
        debug!("Skipping non-object raw record");
        return None;
    }

    let uri = raw.get("uri").and_then(value_as_string);
    let id = first_string(raw, &["uri", "id", "uuid"]).unwrap_or_else(generated_id);
    let snippet = raw
        .get("body")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            raw.get("description")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(|s| leading_chars(s, SNIPPET_LEN))
        .unwrap_or_default();

    Some(Article {
        id,
        title: first_string(raw, &["title", "headline"]).unwrap_or_else(|| UNTITLED.to_string()),
        description: first_string(raw, &["body", "description", "summary"]).unwrap_or_default(),
        keywords: keywords_field(raw),
        snippet,
        url: first_string(raw, &["url", "link"]).unwrap_or_else(|| MISSING_URL.to_string()),
        image_url: image_field(raw),
        language: first_string(raw, &["lang", "language"])
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        published_at: first_string(raw, &["dateTime", "publishedAt", "date"])
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
        source: source_field(raw),
        categories: categories_field(raw),
        relevance_score: relevance_field(raw),
        uri,
    })
}

/// First non-empty string (or number, rendered as text) among `keys`.
fn first_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| raw.get(*key).and_then(value_as_string))
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn leading_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// `keywords` as a string, or `keywords`/`tags` as a list joined with `", "`.
fn keywords_field(raw: &Value) -> String {
    match raw.get("keywords") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Array(list)) => join_strings(list),
        _ => match raw.get("tags") {
            Some(Value::Array(list)) => join_strings(list),
            _ => String::new(),
        },
    }
}

fn join_strings(list: &[Value]) -> String {
    list.iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `image`, `urlToImage`, or the first entry of a `multimedia` list.
fn image_field(raw: &Value) -> String {
    first_string(raw, &["image", "urlToImage"])
        .or_else(|| {
            raw.get("multimedia")?
                .as_array()?
                .first()?
                .get("url")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_default()
}

/// `source` may be a record (with `title` or `name`) or a plain string.
fn source_field(raw: &Value) -> String {
    match raw.get("source") {
        Some(Value::Object(map)) => {
            let title = map.get("title").and_then(Value::as_str).filter(|s| !s.is_empty());
            let name = map.get("name").and_then(Value::as_str).filter(|s| !s.is_empty());
            title.or(name).unwrap_or(UNKNOWN_SOURCE).to_string()
        }
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN_SOURCE.to_string(),
    }
}

/// A `categories` list, else a single-element list from a scalar `category`.
fn categories_field(raw: &Value) -> Vec<String> {
    if let Some(Value::Array(list)) = raw.get("categories") {
        return list.iter().filter_map(category_label).collect();
    }
    raw.get("category").and_then(category_label).into_iter().collect()
}

/// Category entries arrive either as plain strings or as provider records
/// carrying a `label` (or, failing that, a `uri`).
fn category_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("label")
            .and_then(Value::as_str)
            .or_else(|| map.get("uri").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// `relevance` or `score`; negative provider values count as unscored.
fn relevance_field(raw: &Value) -> f64 {
    ["relevance", "score"]
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_f64))
        .unwrap_or(0.0)
        .max(0.0)
}

/// Fallback identifier for records the provider failed to identify.
/// Unique within a batch, but not stable across refetches.
fn generated_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let fraction: f64 = rng().random();
    format!("{millis}-{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_transform_full_record() {
        let raw = json!({
            "uri": "7512345678",
            "title": "Parliament passes budget",
            "body": "The annual budget passed late on Tuesday.",
            "url": "https://example.com/budget",
            "image": "https://example.com/budget.jpg",
            "lang": "eng",
            "dateTime": "2025-08-05T09:30:00Z",
            "source": { "title": "Example Times" },
            "categories": ["news/Politics"],
            "relevance": 34
        });

        let article = transform_article(&raw).unwrap();
        assert_eq!(article.id, "7512345678");
        assert_eq!(article.title, "Parliament passes budget");
        assert_eq!(article.description, "The annual budget passed late on Tuesday.");
        assert_eq!(article.snippet, "The annual budget passed late on Tuesday.");
        assert_eq!(article.url, "https://example.com/budget");
        assert_eq!(article.image_url, "https://example.com/budget.jpg");
        assert_eq!(article.language, "eng");
        assert_eq!(article.published_at, "2025-08-05T09:30:00Z");
        assert_eq!(article.source, "Example Times");
        assert_eq!(article.categories, vec!["news/Politics".to_string()]);
        assert_eq!(article.relevance_score, 34.0);
        assert_eq!(article.uri.as_deref(), Some("7512345678"));
    }

    #[test]
    fn test_transform_minimal_record_fills_placeholders() {
        // The shape from the provider's sparsest endpoint: title, body, url only.
        let raw = json!({ "title": "X", "body": "Y", "url": "http://z" });

        let article = transform_article(&raw).unwrap();
        assert!(!article.id.is_empty());
        assert_eq!(article.description, "Y");
        assert_eq!(article.snippet, "Y");
        assert_eq!(article.url, "http://z");
        assert_eq!(article.source, "Unknown Source");
        assert!(article.categories.is_empty());
        assert_eq!(article.relevance_score, 0.0);
        assert!(article.uri.is_none());
    }

    #[test]
    fn test_transform_alias_fields() {
        let raw = json!({
            "id": 42,
            "headline": "Alias headline",
            "summary": "Alias summary",
            "link": "https://example.com/alias",
            "urlToImage": "https://example.com/alias.png",
            "language": "deu",
            "publishedAt": "2025-08-04T00:00:00Z",
            "source": { "name": "Alias Wire" },
            "score": 7.5
        });

        let article = transform_article(&raw).unwrap();
        assert_eq!(article.id, "42");
        assert_eq!(article.title, "Alias headline");
        assert_eq!(article.description, "Alias summary");
        assert_eq!(article.url, "https://example.com/alias");
        assert_eq!(article.image_url, "https://example.com/alias.png");
        assert_eq!(article.language, "deu");
        assert_eq!(article.published_at, "2025-08-04T00:00:00Z");
        assert_eq!(article.source, "Alias Wire");
        assert_eq!(article.relevance_score, 7.5);
    }

    #[test]
    fn test_empty_strings_fall_through_to_next_alias() {
        let raw = json!({ "title": "", "headline": "Second choice" });
        let article = transform_article(&raw).unwrap();
        assert_eq!(article.title, "Second choice");
    }

    #[test]
    fn test_missing_title_defaults_to_untitled() {
        let article = transform_article(&json!({ "body": "text" })).unwrap();
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.url, "#");
        assert_eq!(article.language, "eng");
    }

    #[test]
    fn test_snippet_truncates_to_300_chars() {
        let body = "a".repeat(500);
        let article = transform_article(&json!({ "body": body })).unwrap();
        assert_eq!(article.snippet.chars().count(), 300);
        assert_eq!(article.description.chars().count(), 500);
    }

    #[test]
    fn test_snippet_falls_back_to_description() {
        let article =
            transform_article(&json!({ "description": "short description" })).unwrap();
        assert_eq!(article.snippet, "short description");
    }

    #[test]
    fn test_source_as_plain_string() {
        let article = transform_article(&json!({ "source": "Reuters" })).unwrap();
        assert_eq!(article.source, "Reuters");
    }

    #[test]
    fn test_source_record_without_usable_field() {
        let article = transform_article(&json!({ "source": { "id": 9 } })).unwrap();
        assert_eq!(article.source, "Unknown Source");
    }

    #[test]
    fn test_scalar_category_becomes_single_element_list() {
        let article = transform_article(&json!({ "category": "technology" })).unwrap();
        assert_eq!(article.categories, vec!["technology".to_string()]);
    }

    #[test]
    fn test_category_records_use_label() {
        let raw = json!({ "categories": [
            { "label": "news/Business", "wgt": 80 },
            "news/Technology",
            { "wgt": 10 }
        ]});
        let article = transform_article(&raw).unwrap();
        assert_eq!(
            article.categories,
            vec!["news/Business".to_string(), "news/Technology".to_string()]
        );
    }

    #[test]
    fn test_keywords_from_tags_list() {
        let article =
            transform_article(&json!({ "tags": ["economy", "inflation"] })).unwrap();
        assert_eq!(article.keywords, "economy, inflation");
    }

    #[test]
    fn test_multimedia_image_fallback() {
        let raw = json!({ "multimedia": [{ "url": "https://example.com/m.jpg" }] });
        let article = transform_article(&raw).unwrap();
        assert_eq!(article.image_url, "https://example.com/m.jpg");
    }

    #[test]
    fn test_non_object_records_are_dropped() {
        assert!(transform_article(&json!(null)).is_none());
        assert!(transform_article(&json!("just a string")).is_none());
        assert!(transform_article(&json!(42)).is_none());
        assert!(transform_article(&json!(["nested", "list"])).is_none());
    }

    #[test]
    fn test_generated_ids_are_unique_within_a_batch() {
        let raw = json!({ "title": "No identifier here" });
        let ids: HashSet<String> = (0..100)
            .map(|_| transform_article(&raw).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn test_transform_is_idempotent_for_identified_records() {
        let raw = json!({
            "uri": "123",
            "title": "Stable",
            "body": "Same text",
            "dateTime": "2025-08-01T00:00:00Z"
        });
        let first = transform_article(&raw).unwrap();
        let second = transform_article(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_relevance_counts_as_unscored() {
        let article = transform_article(&json!({ "relevance": -3 })).unwrap();
        assert_eq!(article.relevance_score, 0.0);
    }

    fn fixture_list() -> Vec<Value> {
        vec![
            json!({ "uri": "1", "title": "one" }),
            json!({ "uri": "2", "title": "two" }),
        ]
    }

    #[test]
    fn test_unwrap_all_envelope_shapes_extract_the_same_list() {
        let list = fixture_list();
        let shapes = [
            json!({ "articles": { "results": list.clone() } }),
            json!({ "articles": list.clone() }),
            json!({ "results": list.clone() }),
            json!(list.clone()),
        ];
        for envelope in &shapes {
            assert_eq!(unwrap_articles(envelope), list);
        }
    }

    #[test]
    fn test_unwrap_prefers_nested_results_over_siblings() {
        let nested = fixture_list();
        let envelope = json!({
            "articles": { "results": nested.clone() },
            "results": [{ "uri": "other" }]
        });
        assert_eq!(unwrap_articles(&envelope), nested);
    }

    #[test]
    fn test_unwrap_unknown_shape_is_zero_results() {
        assert!(unwrap_articles(&json!({ "data": [1, 2] })).is_empty());
        assert!(unwrap_articles(&json!("nope")).is_empty());
    }

    #[test]
    fn test_malformed_entries_shrink_the_batch() {
        let raw = vec![json!({ "uri": "1" }), json!(null), json!({ "uri": "2" })];
        let normalized: Vec<Article> =
            raw.iter().filter_map(transform_article).collect();
        assert_eq!(normalized.len(), 2);
    }
}
