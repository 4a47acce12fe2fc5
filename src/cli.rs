//! Command-line interface definitions for newsdesk.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can be provided via a flag, the `NEWS_API_KEY` environment
//! variable, or the config file.

use clap::{Parser, Subcommand};

/// Command-line arguments for the newsdesk application.
///
/// # Examples
///
/// ```sh
/// # Latest headlines
/// newsdesk latest --limit 10
///
/// # Keyword search (falls back to local ranking when the API is down)
/// newsdesk search "rate cuts"
///
/// # One article, as JSON
/// newsdesk --json show 8247513069
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// News provider API key (overrides the config file)
    #[arg(long, env = "NEWS_API_KEY")]
    pub api_key: Option<String>,

    /// Emit results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the latest politics, technology, and business headlines
    Latest {
        /// Maximum number of articles to return
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Search articles by keywords, with a local fallback ranking
    Search {
        /// Free-text query matched against title and body
        query: String,

        /// Maximum number of articles to return
        #[arg(short, long, default_value_t = 30)]
        limit: usize,
    },

    /// Look up a single article by its identifier
    Show {
        /// Article id, upstream uri, or a unique fragment of its URL
        id: String,
    },
}
