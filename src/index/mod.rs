//! Inverted index data model
//!
//! This module holds the in-memory search structures built by the crawl:
//! - [`Page`]: a crawled page identified by its base URL, carrying a rank
//! - [`PageSet`]: an unordered, URL-deduplicated set of pages
//! - [`InvertedIndex`]: the concurrent token-to-pages map

mod inverted;
mod page;
mod page_set;

pub use inverted::InvertedIndex;
pub use page::Page;
pub use page_set::PageSet;
