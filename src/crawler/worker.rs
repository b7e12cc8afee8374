//! Crawl worker
//!
//! One worker task per section. The coordinator fetches the start page
//! once, slices its links into contiguous sections, and hands each worker
//! its slice; from there each worker runs a depth-bounded recursive crawl
//! over links whose hostname matches the crawl's host pattern.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use crate::crawler::fetcher::Fetcher;
use crate::crawler::registry::VisitedRegistry;
use crate::index::{InvertedIndex, Page};
use crate::text::Normalizer;
use crate::url::{host_of, to_base_url};

/// The start-page share handed to one worker
pub(crate) struct SectionSeed {
    /// Shared handle for the start page, already registered
    pub home: Arc<Page>,

    /// Start-page text; `Some` only for the one section that indexes it
    pub home_text: Option<String>,

    /// This worker's slice of the start page's links
    pub links: Vec<String>,
}

/// A single crawl worker
///
/// Holds shared handles to the registry and index plus this worker's
/// section number; consumed by [`run`](Self::run) inside a spawned task.
pub(crate) struct CrawlWorker {
    pub section: usize,
    pub max_depth: u32,
    pub host_pattern: Regex,
    pub registry: Arc<VisitedRegistry>,
    pub index: Arc<InvertedIndex>,
    pub fetcher: Arc<dyn Fetcher>,
    pub normalizer: Arc<Normalizer>,
}

impl CrawlWorker {
    /// Crawls this worker's section to completion
    pub(crate) async fn run(self, seed: SectionSeed) {
        debug!(
            section = self.section,
            links = seed.links.len(),
            "worker starting"
        );

        if let Some(text) = &seed.home_text {
            self.index
                .index_tokens(self.normalizer.tokenize(text), &seed.home);
        }

        // Links on the start page sit one level below it.
        if self.max_depth == 0 {
            return;
        }
        for link in &seed.links {
            self.crawl_if_in_domain(link, self.max_depth - 1).await;
        }

        debug!(section = self.section, "worker finished");
    }

    /// Applies the host filter, then crawls the link if it passes
    async fn crawl_if_in_domain(&self, link: &str, depth_remaining: u32) {
        match host_of(link) {
            Ok(host) if self.host_pattern.is_match(&host) => {
                self.crawl(link.to_string(), depth_remaining).await;
            }
            Ok(host) => {
                debug!(section = self.section, %host, "skipping off-domain link");
            }
            Err(e) => {
                debug!(section = self.section, link, "skipping link: {e}");
            }
        }
    }

    /// Visits one page and recurses into its links
    ///
    /// The recursion is depth-first within this worker: a page fetched with
    /// no depth remaining is still indexed, but its links are not followed.
    /// Failures here abandon this branch only.
    fn crawl(
        &self,
        link: String,
        depth_remaining: u32,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            let base = match to_base_url(&link) {
                Ok(base) => base,
                Err(e) => {
                    debug!(section = self.section, link, "skipping link: {e}");
                    return;
                }
            };

            // Single gate for every encounter: first one in fetches, the
            // rest bump the rank and back off.
            let (page, was_new) = self.registry.register_or_bump(&base);
            if !was_new {
                return;
            }

            let fetched = match self.fetcher.fetch(&link).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(section = self.section, "abandoning {link}: {e}");
                    return;
                }
            };
            if fetched.base_url != base {
                debug!(
                    section = self.section,
                    from = %base,
                    to = %fetched.base_url,
                    "page moved during fetch"
                );
            }

            self.index
                .index_tokens(self.normalizer.tokenize(&fetched.text), &page);
            debug!(
                section = self.section,
                url = %page.url(),
                depth_remaining,
                "indexed page"
            );

            if depth_remaining == 0 {
                return;
            }
            for next in fetched.links {
                self.crawl_if_in_domain(&next, depth_remaining - 1).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::testutil::StubFetcher;

    fn worker(
        max_depth: u32,
        host_pattern: &str,
        fetcher: Arc<StubFetcher>,
    ) -> (CrawlWorker, Arc<VisitedRegistry>, Arc<InvertedIndex>) {
        let registry = Arc::new(VisitedRegistry::new());
        let index = Arc::new(InvertedIndex::new());
        let worker = CrawlWorker {
            section: 0,
            max_depth,
            host_pattern: Regex::new(&format!("^(?:{host_pattern})$")).unwrap(),
            registry: Arc::clone(&registry),
            index: Arc::clone(&index),
            fetcher,
            normalizer: Arc::new(Normalizer::new()),
        };
        (worker, registry, index)
    }

    fn seed_with_links(links: &[&str]) -> SectionSeed {
        SectionSeed {
            home: Arc::new(Page::new("https://site.test/")),
            home_text: None,
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_indexes_home_text_when_assigned() {
        let fetcher = Arc::new(StubFetcher::new());
        let (worker, _, index) = worker(0, "site\\.test", fetcher);

        let home = Arc::new(Page::new("https://site.test/"));
        let seed = SectionSeed {
            home: Arc::clone(&home),
            home_text: Some("funnel spiders weave".to_string()),
            links: vec!["https://site.test/a".to_string()],
        };
        worker.run(seed).await;

        assert!(index.lookup("funnel").contains(&home));
        // max_depth 0: the slice is never crawled.
        assert!(index.lookup("alpha").is_empty());
    }

    #[tokio::test]
    async fn test_depth_one_fetches_slice_but_not_beyond() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .page("https://site.test/a", "alpha words", &["https://site.test/b"]),
        );
        let (worker, registry, index) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker.run(seed_with_links(&["https://site.test/a"])).await;

        assert_eq!(fetcher.requests(), vec!["https://site.test/a"]);
        assert!(!index.lookup("alpha").is_empty());
        // /b was never reached: depth ran out at /a.
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_depth_two_recurses_one_level() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .page("https://site.test/a", "alpha", &["https://site.test/b"])
                .page("https://site.test/b", "bravo", &["https://site.test/c"]),
        );
        let (worker, registry, index) = worker(2, "site\\.test", Arc::clone(&fetcher));

        worker.run(seed_with_links(&["https://site.test/a"])).await;

        assert_eq!(
            fetcher.requests(),
            vec!["https://site.test/a", "https://site.test/b"]
        );
        assert!(!index.lookup("bravo").is_empty());
        // /b was fetched with no depth remaining, so /c was never encountered.
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_off_domain_links_are_not_fetched() {
        let fetcher = Arc::new(StubFetcher::new().page("https://other.test/x", "offsite", &[]));
        let (worker, registry, _) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker.run(seed_with_links(&["https://other.test/x"])).await;

        assert!(fetcher.requests().is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_host_pattern_matches_whole_hostname() {
        let fetcher = Arc::new(
            StubFetcher::new().page("https://site.test.evil.example/x", "trap", &[]),
        );
        let (worker, registry, _) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker
            .run(seed_with_links(&["https://site.test.evil.example/x"]))
            .await;

        assert!(fetcher.requests().is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_abandons_branch_only() {
        // /a is not in the stub, so fetching it fails; /b still succeeds.
        let fetcher = Arc::new(StubFetcher::new().page("https://site.test/b", "bravo", &[]));
        let (worker, registry, index) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker
            .run(seed_with_links(&[
                "https://site.test/a",
                "https://site.test/b",
            ]))
            .await;

        // Both were registered; only /b produced tokens.
        assert_eq!(registry.len(), 2);
        assert!(index.lookup("bravo").len() == 1);
        assert!(index.lookup("alpha").is_empty());
    }

    #[tokio::test]
    async fn test_repeated_link_bumps_rank_once_per_reencounter() {
        let fetcher = Arc::new(StubFetcher::new().page("https://site.test/a", "alpha", &[]));
        let (worker, registry, _) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker
            .run(seed_with_links(&[
                "https://site.test/a",
                "https://site.test/a",
                "https://site.test/a",
            ]))
            .await;

        // Fetched once, re-encountered twice.
        assert_eq!(fetcher.requests(), vec!["https://site.test/a"]);
        let (page, _) = registry.register_or_bump("https://site.test/a");
        assert_eq!(page.rank(), 3);
    }

    #[tokio::test]
    async fn test_link_variants_collapse_to_one_page() {
        let fetcher = Arc::new(StubFetcher::new().page("https://site.test/a", "alpha", &[]));
        let (worker, registry, _) = worker(1, "site\\.test", Arc::clone(&fetcher));

        worker
            .run(seed_with_links(&[
                "https://site.test/a",
                "https://site.test/a#section",
                "https://site.test/a/",
            ]))
            .await;

        assert_eq!(registry.len(), 1);
        assert_eq!(fetcher.requests().len(), 1);
    }
}
