use std::sync::Arc;

use dashmap::DashMap;

use super::{Page, PageSet};

/// A word-to-pages inverted index
///
/// Maps each normalized token to the [`PageSet`] of pages containing it.
/// The map is sharded (`DashMap`), so worker tasks index pages concurrently
/// through a shared reference; no external locking is required.
///
/// Lookups are read-only: asking for a token that was never indexed returns
/// an empty set and leaves the index untouched, so interleaved queries can
/// never grow the token table.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: DashMap<String, PageSet>,
}

impl InvertedIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates a page with every token in `tokens`
    ///
    /// Empty tokens are skipped. Indexing the same token for the same page
    /// more than once has no further effect, so callers need not deduplicate
    /// the token stream.
    pub fn index_tokens<I>(&self, tokens: I, page: &Arc<Page>)
    where
        I: IntoIterator<Item = String>,
    {
        for token in tokens {
            if token.is_empty() {
                continue;
            }
            self.postings
                .entry(token)
                .or_default()
                .insert(Arc::clone(page));
        }
    }

    /// Returns the set of pages containing `token`
    ///
    /// Unknown tokens yield an empty set; the index itself is never modified
    /// by a lookup.
    pub fn lookup(&self, token: &str) -> PageSet {
        self.postings
            .get(token)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns the number of distinct tokens in the index
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Returns whether the index holds no tokens
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Snapshots all postings, sorted by token
    ///
    /// Used when persisting the index; the sort gives a stable write order.
    pub fn postings(&self) -> Vec<(String, PageSet)> {
        let mut all: Vec<(String, PageSet)> = self
            .postings
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }
}
