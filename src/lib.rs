//! Funnelweb: a bounded-domain web crawler and search index
//!
//! This crate crawls outward from a start URL with a fixed pool of worker
//! tasks, builds a word-to-page inverted index from everything it visits,
//! and answers boolean AND queries over that index with results ordered by
//! how often each page was encountered during the crawl.

pub mod config;
pub mod crawler;
pub mod index;
pub mod query;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Per-page trouble (an unreachable link, a PDF, a malformed href) is
/// handled inside the workers and never becomes one of these; this type
/// covers the failures that end a crawl or a CLI run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid host pattern '{pattern}': {source}")]
    HostPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Start URL rejected: {0}")]
    StartUrl(#[from] UrlError),

    #[error("Could not fetch start page {url}: {source}")]
    StartPage {
        url: String,
        #[source]
        source: crawler::FetchError,
    },

    #[error("Crawl failed: {failed} worker task(s) did not finish")]
    WorkersFailed { failed: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlCoordinator, CrawlOutcome, CrawlStats};
pub use index::{InvertedIndex, Page, PageSet};
pub use query::QueryEngine;
pub use text::Normalizer;
