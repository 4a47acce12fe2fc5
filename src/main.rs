//! # newsdesk
//!
//! A small news-browsing client for a third-party news-search API. It
//! fetches the latest headlines, searches by keyword, and resolves single
//! articles by identifier, normalizing the provider's inconsistent response
//! shapes into one canonical article form.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... newsdesk latest --limit 10
//! NEWS_API_KEY=... newsdesk search "rate cuts"
//! NEWS_API_KEY=... newsdesk --json show 8247513069
//! ```
//!
//! ## Architecture
//!
//! Each command is one pipeline:
//! 1. **Fetch**: a single POST to the provider's `getArticles` endpoint
//! 2. **Unwrap**: locate the raw article list inside the response envelope
//! 3. **Normalize**: map every raw record into a canonical [`models::Article`]
//! 4. **Render**: text or JSON to stdout
//!
//! Keyword search additionally degrades to a local relevance ranking over a
//! latest-news snapshot when the remote search fails or comes back empty;
//! only the plain latest-news path is allowed to fail loudly.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod normalize;
mod outputs;
mod search;
mod utils;

use api::NewsClient;
use cli::{Cli, Command};
use config::Config;
use models::Article;
use utils::{format_search_query, is_valid_search_query};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsdesk starting up");

    let args = Cli::parse();
    debug!(?args.command, json = args.json, "Parsed CLI arguments");

    // A missing API key is fatal; see Config::load.
    let config = match Config::load(args.config.as_deref(), args.api_key.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is unusable; refusing to start");
            return Err(e.into());
        }
    };

    let client = NewsClient::new(config)?;

    match args.command {
        Command::Latest { limit } => {
            // Only this path is allowed to fail loudly; transport and HTTP
            // errors propagate.
            let articles = client.fetch_latest_news(limit).await?;
            if articles.is_empty() {
                println!("No articles available right now.");
            } else {
                print_articles(&articles, args.json)?;
            }
        }
        Command::Search { query, limit } => {
            if !is_valid_search_query(&query) {
                warn!(%query, "Rejected search query");
                println!("Search queries must be between 2 and 100 characters.");
                return Ok(());
            }
            let query = format_search_query(&query);
            let articles = client.search_news_by_keywords(&query, limit).await;
            if articles.is_empty() {
                // Zero results is not an error; keep the messaging neutral.
                println!("No articles found for \"{query}\". Try broader or different keywords.");
            } else {
                info!(count = articles.len(), %query, "Search produced results");
                print_articles(&articles, args.json)?;
            }
        }
        Command::Show { id } => match client.get_article_by_id(&id).await {
            Some(article) => {
                if args.json {
                    println!("{}", outputs::json::render_article(&article)?);
                } else {
                    print!("{}", outputs::text::render_article(&article));
                }
            }
            None => {
                println!(
                    "Article not found. It may have rotated out of the latest-news window."
                );
            }
        },
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");

    Ok(())
}

fn print_articles(articles: &[Article], as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        println!("{}", outputs::json::render_articles(articles)?);
    } else {
        print!("{}", outputs::text::render_article_list(articles));
    }
    Ok(())
}
