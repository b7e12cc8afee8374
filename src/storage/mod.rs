//! Storage module for persisting the search index
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Saving a finished index (pages, ranks, and postings)
//! - Loading the index back for searching
//! - Crawl metadata history

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{IndexStore, StorageError, StorageResult};

use chrono::{DateTime, Utc};

/// Parameters and timing of one crawl, as handed to the store
#[derive(Debug, Clone)]
pub struct CrawlMeta {
    pub start_url: String,
    pub host_pattern: String,
    pub max_depth: u32,
    pub workers: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A saved crawl row, as read back from the store
#[derive(Debug, Clone)]
pub struct CrawlRecord {
    pub id: i64,
    pub start_url: String,
    pub host_pattern: String,
    pub max_depth: u32,
    pub workers: usize,
    pub started_at: String,
    pub finished_at: String,
    pub page_count: usize,
    pub token_count: usize,
}
