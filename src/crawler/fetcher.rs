//! HTTP fetching
//!
//! This module owns the network side of the crawl:
//! - the [`Fetcher`] trait, the seam between workers and the network
//! - [`HttpFetcher`], the reqwest-backed implementation
//! - fetch error classification
//!
//! Fetch errors are node-local: they abandon one page's branch of the
//! crawl, never the crawl itself.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::crawler::parser::parse_page;
use crate::url::base_url_of;

/// A fetched page, parsed and ready for registration and indexing
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Canonical base URL of the document, after redirects
    pub base_url: String,

    /// Outbound links as absolute URLs
    pub links: Vec<String>,

    /// Raw visible text of the document
    pub text: String,
}

/// Why a single page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed before a response arrived (DNS, connect, timeout)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response is not an HTML document
    #[error("{url} is not HTML (content-type: {content_type:?})")]
    ContentType { url: String, content_type: String },
}

/// Fetches and parses pages for the crawl workers
///
/// Workers only ever see this trait, so tests can drive a crawl against a
/// scripted set of pages with no network involved.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns its parsed form
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Production [`Fetcher`] backed by a reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the user agent string and request timeouts
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Ready-to-use fetcher
    /// * `Err(reqwest::Error)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

/// Builds the underlying HTTP client
///
/// User agent format: `Name/Version` with ` (+contact-url)` appended when
/// a contact URL is configured. Redirects are followed, so the final URL
/// of a response may differ from the requested one.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let ua = &config.user_agent;
    let user_agent = match &ua.contact_url {
        Some(contact) => format!("{}/{} (+{})", ua.name, ua.version, contact),
        None => format!("{}/{}", ua.name, ua.version),
    };

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_millis(config.crawler.fetch_timeout_ms))
        .connect_timeout(Duration::from_millis(config.crawler.connect_timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::ContentType {
                url: url.to_string(),
                content_type,
            });
        }

        // The final URL (after redirects) is the document's real location;
        // relative links resolve against it, not the requested URL.
        let final_url = response.url().clone();

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        let parsed = parse_page(&body, &final_url);

        Ok(FetchedPage {
            base_url: base_url_of(&final_url),
            links: parsed.links,
            text: parsed.text,
        })
    }
}
