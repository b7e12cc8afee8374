//! Boolean AND search over a finished index
//!
//! A query is a list of words; a page matches when it contains every one
//! of them. Query words pass through the same normalizer the crawl used,
//! so "Funding" finds pages indexed under the stem "fund".

use std::sync::Arc;

use tracing::debug;

use crate::index::{InvertedIndex, Page, PageSet};
use crate::text::Normalizer;

/// Runs AND queries against an [`InvertedIndex`]
pub struct QueryEngine {
    normalizer: Arc<Normalizer>,
}

impl QueryEngine {
    /// Creates an engine sharing the crawl's normalizer
    ///
    /// Queries only match when words normalize exactly as they did at
    /// index time, so the normalizer (stopword list included) must be the
    /// same one the crawl ran with.
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        Self { normalizer }
    }

    /// Returns the pages containing every query word, best-ranked first
    ///
    /// Words that normalize to nothing (stopwords, pure punctuation) are
    /// dropped from the query. A query with no searchable words left, or
    /// any term absent from the index, matches no pages. Results come out
    /// ordered by descending rank, with ties broken by URL, so the same
    /// query against the same index always prints identically.
    ///
    /// The index is never modified; looking up an unknown term does not
    /// create an entry for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use funnelweb::index::{InvertedIndex, Page};
    /// use funnelweb::query::QueryEngine;
    /// use funnelweb::text::Normalizer;
    ///
    /// let normalizer = Arc::new(Normalizer::new());
    /// let index = InvertedIndex::new();
    /// let page = Arc::new(Page::new("https://example.com/grants"));
    /// index.index_tokens(normalizer.tokenize("research funding deadlines"), &page);
    ///
    /// let engine = QueryEngine::new(Arc::clone(&normalizer));
    /// let hits = engine.search(&index, &["research", "Funding"]);
    /// assert_eq!(hits[0].url(), "https://example.com/grants");
    /// ```
    pub fn search<S: AsRef<str>>(&self, index: &InvertedIndex, query_words: &[S]) -> Vec<Arc<Page>> {
        let terms: Vec<String> = query_words
            .iter()
            .filter_map(|word| self.normalizer.normalize(word.as_ref()))
            .collect();
        if terms.is_empty() {
            debug!("query reduced to no searchable terms");
            return Vec::new();
        }

        let mut matches: Option<PageSet> = None;
        for term in &terms {
            let narrowed = match &matches {
                None => index.lookup(term),
                Some(acc) => acc.intersect(&index.lookup(term)),
            };
            if narrowed.is_empty() {
                debug!(%term, "term eliminated every page");
                return Vec::new();
            }
            matches = Some(narrowed);
        }

        let mut hits: Vec<Arc<Page>> = matches
            .map(|set| set.iter().map(Arc::clone).collect())
            .unwrap_or_default();
        // Highest rank first; URL breaks ties so output order is reproducible.
        hits.sort_by(|a, b| b.rank().cmp(&a.rank()).then_with(|| a.url().cmp(b.url())));

        debug!(terms = terms.len(), hits = hits.len(), "query finished");
        hits
    }
}
