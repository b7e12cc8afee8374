use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// A crawled page tracked by the index
///
/// A page's identity is its normalized base URL: two `Page` values are
/// equal (and hash identically) whenever their URLs are equal, regardless
/// of rank. The rank counts how many times the crawl re-encountered the
/// page after its first registration, so a page linked from many places
/// ranks higher than one found once.
///
/// Pages are shared across worker tasks behind `Arc`, which is why the
/// rank lives in an atomic rather than requiring `&mut` access.
#[derive(Debug)]
pub struct Page {
    url: String,
    rank: AtomicU64,
}

impl Page {
    /// Creates a page with rank 0 (first encounter)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rank: AtomicU64::new(0),
        }
    }

    /// Creates a page with a known rank, used when loading a saved index
    pub fn with_rank(url: impl Into<String>, rank: u64) -> Self {
        Self {
            url: url.into(),
            rank: AtomicU64::new(rank),
        }
    }

    /// Returns the page's normalized base URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the number of times the page was re-encountered
    pub fn rank(&self) -> u64 {
        self.rank.load(Ordering::Relaxed)
    }

    /// Records one re-encounter of this page
    pub(crate) fn bump_rank(&self) {
        self.rank.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}
