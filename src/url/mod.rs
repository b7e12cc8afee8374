//! URL handling
//!
//! Canonicalizes links into the base-URL form used as page identity, and
//! extracts hostnames for host-pattern filtering.

mod domain;
mod normalize;

pub use domain::host_of;
pub use normalize::{base_url_of, to_base_url};

use crate::UrlError;
use url::Url;

/// Parses a link and checks it is a fetchable HTTP(S) URL with a host
pub(crate) fn parse_http_url(link: &str) -> Result<Url, UrlError> {
    let url = Url::parse(link).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
