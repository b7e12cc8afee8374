//! Crawling: fetching, parsing, visit tracking, and coordination
//!
//! The crawl fans out exactly once, at the start page: the coordinator
//! fetches it, partitions its links into contiguous sections, and runs one
//! worker per section. Workers share a [`VisitedRegistry`] so every page is
//! fetched at most once crawl-wide, and re-encounters of a page raise its
//! rank instead.

mod coordinator;
mod fetcher;
mod parser;
mod registry;
mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use coordinator::{CrawlCoordinator, CrawlOutcome, CrawlStats};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{parse_page, ParsedPage};
pub use registry::VisitedRegistry;
