//! SQLite storage implementation
//!
//! This module provides the SQLite-based implementation of the
//! [`IndexStore`] trait.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};

use crate::index::{InvertedIndex, Page};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{IndexStore, StorageResult};
use crate::storage::{CrawlMeta, CrawlRecord};

/// SQLite index store
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates an index database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl IndexStore for SqliteStorage {
    fn save_index(&mut self, index: &InvertedIndex, meta: &CrawlMeta) -> StorageResult<()> {
        let postings = index.postings();
        let tx = self.conn.transaction()?;

        // The previous crawl's rows go away in the same transaction that
        // writes the new ones, so the stored index is always whole.
        tx.execute("DELETE FROM postings", [])?;
        tx.execute("DELETE FROM pages", [])?;

        let mut page_ids: HashMap<&str, i64> = HashMap::new();
        {
            let mut insert_page = tx.prepare("INSERT INTO pages (url, rank) VALUES (?1, ?2)")?;
            let mut insert_posting =
                tx.prepare("INSERT OR IGNORE INTO postings (token, page_id) VALUES (?1, ?2)")?;

            for (token, pages) in &postings {
                for page in pages.iter() {
                    let page_id = match page_ids.get(page.url()) {
                        Some(id) => *id,
                        None => {
                            insert_page.execute(params![page.url(), page.rank() as i64])?;
                            let id = tx.last_insert_rowid();
                            page_ids.insert(page.url(), id);
                            id
                        }
                    };
                    insert_posting.execute(params![token, page_id])?;
                }
            }
        }

        tx.execute(
            "INSERT INTO crawls (start_url, host_pattern, max_depth, workers, started_at,
             finished_at, page_count, token_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                meta.start_url,
                meta.host_pattern,
                meta.max_depth,
                meta.workers as i64,
                meta.started_at.to_rfc3339(),
                meta.finished_at.to_rfc3339(),
                page_ids.len() as i64,
                postings.len() as i64,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn load_index(&self) -> StorageResult<InvertedIndex> {
        let index = InvertedIndex::new();

        // One shared Page handle per row, so every posting for a URL sees
        // the same rank.
        let mut pages: HashMap<i64, Arc<Page>> = HashMap::new();
        let mut stmt = self.conn.prepare("SELECT id, url, rank FROM pages")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        for row in rows {
            let (id, url, rank) = row?;
            pages.insert(id, Arc::new(Page::with_rank(url, rank as u64)));
        }

        let mut stmt = self.conn.prepare("SELECT token, page_id FROM postings")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (token, page_id) = row?;
            if let Some(page) = pages.get(&page_id) {
                index.index_tokens([token], page);
            }
        }

        Ok(index)
    }

    fn latest_crawl(&self) -> StorageResult<Option<CrawlRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_url, host_pattern, max_depth, workers, started_at, finished_at,
             page_count, token_count
             FROM crawls ORDER BY id DESC LIMIT 1",
        )?;

        let record = stmt
            .query_row([], |row| {
                Ok(CrawlRecord {
                    id: row.get(0)?,
                    start_url: row.get(1)?,
                    host_pattern: row.get(2)?,
                    max_depth: row.get(3)?,
                    workers: row.get::<_, i64>(4)? as usize,
                    started_at: row.get(5)?,
                    finished_at: row.get(6)?,
                    page_count: row.get::<_, i64>(7)? as usize,
                    token_count: row.get::<_, i64>(8)? as usize,
                })
            })
            .optional()?;

        Ok(record)
    }
}
