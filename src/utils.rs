//! Utility functions for string manipulation, URL inspection, and reading
//! time estimates.
//!
//! This module provides helper functions used throughout the application:
//! - Slug generation for article anchors and share links
//! - Text truncation for list views and log lines
//! - Domain extraction and image-URL sanity checks
//! - Reading time estimation for rendered articles
//! - Search query cleanup and validation

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Words-per-minute assumed for reading time estimates.
const WORDS_PER_MINUTE: usize = 200;

static IMAGE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg)$").unwrap());

/// Convert a title to a URL-friendly slug.
///
/// Lowercases the text, removes special characters, replaces whitespace
/// with hyphens, and collapses hyphen runs.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Hello World"), "hello-world");
/// assert_eq!(slugify_title("Rate -- Cuts!"), "rate-cuts");
/// ```
pub fn slugify_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // swallow leading hyphens
    for c in title.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Truncate text to `max` characters, appending an ellipsis when trimmed.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max).collect();
        format!("{kept}...")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Extract a readable domain name from a URL, stripping any `www.` prefix.
///
/// Returns `"Unknown Source"` when the URL cannot be parsed, the same
/// placeholder the normalizer uses for absent sources, so rendering code
/// treats both cases alike.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host.trim_start_matches("www.").to_string(),
        None => "Unknown Source".to_string(),
    }
}

/// Heuristic check that an image URL is likely to render.
///
/// The URL must parse and either end in a known image extension or contain
/// `"image"` somewhere in it (CDN paths rarely keep extensions).
pub fn is_valid_image_url(url: &str) -> bool {
    if url.is_empty() || Url::parse(url).is_err() {
        return false;
    }
    IMAGE_EXT_RE.is_match(url) || url.contains("image")
}

/// Reading time estimate in whole minutes, never below one.
pub fn reading_time(text: &str) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Format a reading time estimate into a human-readable string.
pub fn format_reading_time(minutes: usize) -> String {
    if minutes == 1 {
        "1 min read".to_string()
    } else {
        format!("{minutes} min read")
    }
}

/// Normalize a search query for display: trim and collapse inner whitespace.
pub fn format_search_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A usable search query is 2 to 100 characters after trimming.
pub fn is_valid_search_query(query: &str) -> bool {
    let trimmed = query.trim();
    (2..=100).contains(&trimmed.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Hello World"), "hello-world");
        assert_eq!(slugify_title("Test-Article!"), "test-article");
        assert_eq!(slugify_title("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify_title("Special@#$Characters"), "specialcharacters");
        assert_eq!(
            slugify_title("Trump-Xi 'situationship'"),
            "trump-xi-situationship"
        );
        assert_eq!(slugify_title("  padded  "), "padded");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("", 10), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.example.com/story"), "example.com");
        assert_eq!(extract_domain("https://lite.cnn.com/a/b"), "lite.cnn.com");
        assert_eq!(extract_domain("not a url"), "Unknown Source");
        assert_eq!(extract_domain("#"), "Unknown Source");
    }

    #[test]
    fn test_is_valid_image_url() {
        assert!(is_valid_image_url("https://cdn.example.com/pic.JPG"));
        assert!(is_valid_image_url("https://cdn.example.com/pic.webp"));
        assert!(is_valid_image_url("https://example.com/image/12345"));
        assert!(!is_valid_image_url("https://example.com/story.html"));
        assert!(!is_valid_image_url(""));
        assert!(!is_valid_image_url("pic.png")); // relative, does not parse
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("just a few words"), 1);
        let long = "word ".repeat(401);
        assert_eq!(reading_time(&long), 3);
    }

    #[test]
    fn test_format_reading_time() {
        assert_eq!(format_reading_time(1), "1 min read");
        assert_eq!(format_reading_time(4), "4 min read");
    }

    #[test]
    fn test_format_search_query() {
        assert_eq!(format_search_query("  rate   cuts "), "rate cuts");
    }

    #[test]
    fn test_is_valid_search_query() {
        assert!(is_valid_search_query("ai"));
        assert!(is_valid_search_query("federal reserve"));
        assert!(!is_valid_search_query("x"));
        assert!(!is_valid_search_query("   "));
        assert!(!is_valid_search_query(&"q".repeat(101)));
    }
}
