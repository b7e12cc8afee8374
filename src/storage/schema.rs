//! Database schema definitions
//!
//! One index file holds the pages and postings of the most recent crawl
//! plus a history of crawl metadata rows.

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
-- One row per crawl ever saved into this file
CREATE TABLE IF NOT EXISTS crawls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_url TEXT NOT NULL,
    host_pattern TEXT NOT NULL,
    max_depth INTEGER NOT NULL,
    workers INTEGER NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    page_count INTEGER NOT NULL,
    token_count INTEGER NOT NULL
);

-- Pages reachable from the saved index
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    rank INTEGER NOT NULL DEFAULT 0
);

-- token -> page postings of the inverted index
CREATE TABLE IF NOT EXISTS postings (
    token TEXT NOT NULL,
    page_id INTEGER NOT NULL REFERENCES pages(id),
    UNIQUE(token, page_id)
);

CREATE INDEX IF NOT EXISTS idx_postings_token ON postings(token);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
