//! Human-readable article rendering for the terminal.

use crate::models::Article;
use crate::utils::{
    extract_domain, format_reading_time, is_valid_image_url, reading_time, slugify_title,
    truncate_text,
};
use itertools::Itertools;
use std::fmt::Write;

/// Snippet length shown per entry in list views.
const LIST_SNIPPET_LEN: usize = 160;

/// Render a numbered article list, one block per article.
pub fn render_article_list(articles: &[Article]) -> String {
    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, article.title).unwrap();
        writeln!(
            out,
            "     {} · {} · {}",
            article.source,
            article.published_at,
            format_reading_time(reading_time(&article.description))
        )
        .unwrap();
        if !article.snippet.is_empty() {
            writeln!(out, "     {}", truncate_text(&article.snippet, LIST_SNIPPET_LEN)).unwrap();
        }
        writeln!(out, "     {}  (id: {})", article.url, article.id).unwrap();
        writeln!(out).unwrap();
    }
    out
}

/// Render a single article in full.
pub fn render_article(article: &Article) -> String {
    let mut out = String::new();
    writeln!(out, "{}", article.title).unwrap();
    writeln!(out, "{}", "=".repeat(article.title.chars().count().max(8))).unwrap();
    writeln!(
        out,
        "Source: {} ({})",
        article.source,
        extract_domain(&article.url)
    )
    .unwrap();
    writeln!(out, "Published: {}", article.published_at).unwrap();
    writeln!(
        out,
        "Reading time: {}",
        format_reading_time(reading_time(&article.description))
    )
    .unwrap();
    if !article.categories.is_empty() {
        writeln!(out, "Categories: {}", article.categories.iter().join(", ")).unwrap();
    }
    if !article.keywords.is_empty() {
        writeln!(out, "Keywords: {}", article.keywords).unwrap();
    }
    if article.relevance_score > 0.0 {
        writeln!(out, "Relevance: {}", article.relevance_score).unwrap();
    }
    if is_valid_image_url(&article.image_url) {
        writeln!(out, "Image: {}", article.image_url).unwrap();
    }
    writeln!(out).unwrap();
    if !article.description.is_empty() {
        writeln!(out, "{}", article.description).unwrap();
        writeln!(out).unwrap();
    }
    if article.url != "#" {
        writeln!(out, "Read more: {}", article.url).unwrap();
        writeln!(out, "Share slug: {}", slugify_title(&article.title)).unwrap();
    }
    out
}
