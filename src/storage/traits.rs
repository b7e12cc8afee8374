//! Storage traits and error types
//!
//! This module defines the trait interface for index persistence backends
//! and associated error types.

use thiserror::Error;

use crate::index::InvertedIndex;
use crate::storage::{CrawlMeta, CrawlRecord};

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for index persistence backends
///
/// A store holds exactly one index (the most recent crawl's) plus the
/// metadata history of every crawl ever saved into it.
pub trait IndexStore {
    /// Replaces the stored index and appends a crawl record
    ///
    /// Only pages reachable from the index's postings are saved; a page
    /// that was registered during the crawl but never indexed is not.
    /// The replacement is atomic: a reader never sees half an index.
    ///
    /// # Arguments
    ///
    /// * `index` - The finished index to persist
    /// * `meta` - Parameters and timing of the crawl that produced it
    fn save_index(&mut self, index: &InvertedIndex, meta: &CrawlMeta) -> StorageResult<()>;

    /// Loads the stored index, ranks included
    ///
    /// An empty store loads as an empty index.
    fn load_index(&self) -> StorageResult<InvertedIndex>;

    /// Gets the metadata of the most recently saved crawl
    fn latest_crawl(&self) -> StorageResult<Option<CrawlRecord>>;
}
