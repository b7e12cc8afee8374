//! Crawl coordination
//!
//! The coordinator owns the crawl's one fan-out point: it fetches the
//! start page a single time, splits that page's outbound links into
//! contiguous sections, and spawns one worker task per section. All
//! workers share one visited-page registry and one inverted index; the
//! coordinator awaits every worker and then hands the finished index back.

use std::sync::Arc;
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{error, info};

use crate::crawler::fetcher::Fetcher;
use crate::crawler::registry::VisitedRegistry;
use crate::crawler::worker::{CrawlWorker, SectionSeed};
use crate::index::InvertedIndex;
use crate::text::Normalizer;
use crate::url::to_base_url;
use crate::CrawlError;

/// Coordinates a worker pool over one crawl
pub struct CrawlCoordinator {
    workers: usize,
    fetcher: Arc<dyn Fetcher>,
    normalizer: Arc<Normalizer>,
}

/// A finished crawl: the index plus summary numbers
#[derive(Debug)]
pub struct CrawlOutcome {
    pub index: InvertedIndex,
    pub stats: CrawlStats,
}

/// Summary numbers for a completed crawl
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Pages registered, whether or not their fetch succeeded
    pub pages_visited: usize,

    /// Distinct tokens in the finished index
    pub distinct_tokens: usize,

    /// Wall-clock time from start-page fetch to last worker exit
    pub duration: Duration,
}

impl CrawlCoordinator {
    /// Creates a coordinator with a fixed worker pool size
    ///
    /// `workers` below 1 is treated as 1. The fetcher and normalizer are
    /// shared by every worker in every crawl this coordinator runs.
    pub fn new(workers: usize, fetcher: Arc<dyn Fetcher>, normalizer: Arc<Normalizer>) -> Self {
        Self {
            workers: workers.max(1),
            fetcher,
            normalizer,
        }
    }

    /// Crawls from `start_url` and returns the completed index
    ///
    /// The start page is fetched exactly once; its outbound links are
    /// partitioned across the pool and each worker recurses over its own
    /// section, at most `max_depth` levels below the start page. Recursion
    /// only follows links whose hostname matches `host_pattern` (anchored,
    /// whole-hostname). The call returns after every worker has finished;
    /// no partial index is ever observable.
    ///
    /// # Arguments
    ///
    /// * `start_url` - The page the crawl fans out from
    /// * `host_pattern` - Regular expression a link's hostname must match
    /// * `max_depth` - How many levels of links to follow from the start page
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The completed index and crawl statistics
    /// * `Err(CrawlError)` - The start page was unreachable, the pattern or
    ///   URL was invalid, or a worker task died
    pub async fn crawl(
        &self,
        start_url: &str,
        host_pattern: &str,
        max_depth: u32,
    ) -> crate::Result<CrawlOutcome> {
        // Whole-hostname match: "wwu.edu" must not pass for "wwu.edu.evil.example".
        let host_regex =
            Regex::new(&format!("^(?:{host_pattern})$")).map_err(|source| {
                CrawlError::HostPattern {
                    pattern: host_pattern.to_string(),
                    source,
                }
            })?;

        let home_base = to_base_url(start_url)?;
        let started = Instant::now();

        let registry = Arc::new(VisitedRegistry::new());
        let index = Arc::new(InvertedIndex::new());

        // The one shared fetch of the start page. Workers partition this
        // link list; they never re-fetch it. Nothing to crawl without it,
        // so failure here is fatal.
        let (home, _) = registry.register_or_bump(&home_base);
        let fetched =
            self.fetcher
                .fetch(start_url)
                .await
                .map_err(|source| CrawlError::StartPage {
                    url: start_url.to_string(),
                    source,
                })?;

        info!(
            url = %home_base,
            links = fetched.links.len(),
            workers = self.workers,
            max_depth,
            "starting crawl"
        );

        let mut handles = Vec::with_capacity(self.workers);
        for section in 0..self.workers {
            let (start, end) = section_bounds(section, fetched.links.len(), self.workers);
            let seed = SectionSeed {
                home: Arc::clone(&home),
                // Section 0 alone indexes the start page's own text.
                home_text: (section == 0).then(|| fetched.text.clone()),
                links: fetched.links[start..end].to_vec(),
            };
            let worker = CrawlWorker {
                section,
                max_depth,
                host_pattern: host_regex.clone(),
                registry: Arc::clone(&registry),
                index: Arc::clone(&index),
                fetcher: Arc::clone(&self.fetcher),
                normalizer: Arc::clone(&self.normalizer),
            };
            handles.push(tokio::spawn(worker.run(seed)));
        }

        // Join every worker before judging the crawl, so a failure never
        // leaves tasks running against a registry we have given up on.
        let mut failed = 0usize;
        for handle in handles {
            if let Err(e) = handle.await {
                error!("worker task failed: {e}");
                failed += 1;
            }
        }
        if failed > 0 {
            return Err(CrawlError::WorkersFailed { failed });
        }

        let stats = CrawlStats {
            pages_visited: registry.len(),
            distinct_tokens: index.token_count(),
            duration: started.elapsed(),
        };
        info!(
            pages = stats.pages_visited,
            tokens = stats.distinct_tokens,
            elapsed_ms = stats.duration.as_millis() as u64,
            "crawl complete"
        );

        // Every worker has been joined, so this is the last index handle.
        let index = Arc::try_unwrap(index).expect("no index handles remain after join");
        Ok(CrawlOutcome { index, stats })
    }
}

/// Computes one section's half-open slice bounds over the start page's links
///
/// `total` links are split into `workers` contiguous slices of
/// `total / workers` links each; the last section absorbs the remainder
/// of the integer division. Together the slices cover `[0, total)` with
/// no gap and no overlap. When there are fewer links than workers, the
/// early sections come out empty and the last section takes everything.
pub(crate) fn section_bounds(section: usize, total: usize, workers: usize) -> (usize, usize) {
    let per_section = total / workers;
    let start = section * per_section;
    let end = if section == workers - 1 {
        total
    } else {
        (section + 1) * per_section
    };
    (start, end)
}
