//! Visited-page registry

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::index::Page;

/// Registry of every page the crawl has encountered, shared by all workers
///
/// Every encounter of a URL, first or repeat, passes through
/// [`register_or_bump`](Self::register_or_bump). The first encounter
/// registers the page at rank 0 and tells the caller to go fetch it; every
/// later encounter bumps the page's rank and tells the caller to stop.
///
/// The lookup and the insert happen under a single shard guard, so two
/// workers racing on the same URL can never both be told the page is new:
/// no page is fetched or indexed twice, and no encounter goes uncounted.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    pages: DashMap<String, Arc<Page>>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base URL, or bumps its rank if already registered
    ///
    /// # Arguments
    ///
    /// * `base_url` - The page's canonical base URL
    ///
    /// # Returns
    ///
    /// The shared page handle, and `true` when this call registered it
    /// (the caller owns fetching and indexing it) or `false` when the page
    /// was already known (its rank has been bumped; the caller stops).
    pub fn register_or_bump(&self, base_url: &str) -> (Arc<Page>, bool) {
        match self.pages.entry(base_url.to_string()) {
            Entry::Occupied(entry) => {
                let page = Arc::clone(entry.get());
                page.bump_rank();
                (page, false)
            }
            Entry::Vacant(entry) => {
                let page = Arc::new(Page::new(base_url));
                entry.insert(Arc::clone(&page));
                (page, true)
            }
        }
    }

    /// Returns the number of registered pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether no page has been registered yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_is_new() {
        let registry = VisitedRegistry::new();
        let (page, was_new) = registry.register_or_bump("https://e.com/a");
        assert!(was_new);
        assert_eq!(page.rank(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reencounters_bump_rank() {
        let registry = VisitedRegistry::new();

        let (_, was_new) = registry.register_or_bump("https://e.com/a");
        assert!(was_new);

        for _ in 0..4 {
            let (page, was_new) = registry.register_or_bump("https://e.com/a");
            assert!(!was_new);
            assert_eq!(page.url(), "https://e.com/a");
        }

        // N registrations leave rank N - 1.
        let (page, _) = registry.register_or_bump("https://e.com/a");
        assert_eq!(page.rank(), 5);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_handle_returned_every_time() {
        let registry = VisitedRegistry::new();
        let (first, _) = registry.register_or_bump("https://e.com/a");
        let (second, _) = registry.register_or_bump("https://e.com/a");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_urls_are_independent() {
        let registry = VisitedRegistry::new();
        registry.register_or_bump("https://e.com/a");
        registry.register_or_bump("https://e.com/a");
        let (b, was_new) = registry.register_or_bump("https://e.com/b");

        assert!(was_new);
        assert_eq!(b.rank(), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_registration_counts_every_encounter() {
        let registry = Arc::new(VisitedRegistry::new());
        let threads = 8;
        let per_thread = 100;

        std::thread::scope(|scope| {
            for _ in 0..threads {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for _ in 0..per_thread {
                        registry.register_or_bump("https://e.com/contended");
                    }
                });
            }
        });

        let (page, was_new) = registry.register_or_bump("https://e.com/contended");
        assert!(!was_new);
        // threads * per_thread registrations before this one: exactly one
        // was the first, the rest were bumps, plus the bump just above.
        assert_eq!(page.rank(), (threads * per_thread) as u64);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_urls_all_registered() {
        let registry = Arc::new(VisitedRegistry::new());

        std::thread::scope(|scope| {
            for t in 0..4 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for i in 0..50 {
                        registry.register_or_bump(&format!("https://e.com/{t}/{i}"));
                    }
                });
            }
        });

        assert_eq!(registry.len(), 200);
    }
}
