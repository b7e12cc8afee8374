//! Test doubles shared by the crawler unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher};
use crate::url::to_base_url;

/// An in-memory site standing in for the network
///
/// Built up page by page with [`page`](Self::page); any URL nobody added
/// answers with a 404-shaped error. Every fetch is recorded in call order.
pub(crate) struct StubFetcher {
    pages: HashMap<String, FetchedPage>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Adds a page, keyed by the exact URL a worker will fetch
    pub(crate) fn page(mut self, url: &str, text: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                base_url: to_base_url(url).unwrap(),
                links: links.iter().map(|l| l.to_string()).collect(),
                text: text.to_string(),
            },
        );
        self
    }

    /// Every URL fetched so far, in call order
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
