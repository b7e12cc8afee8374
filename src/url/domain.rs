use super::parse_http_url;
use crate::UrlError;

/// Extracts the hostname from a link
///
/// The hostname is what the crawl's host pattern is matched against. It is
/// returned lowercased; ports, paths and credentials are not part of it.
///
/// # Arguments
///
/// * `link` - The link to extract the hostname from
///
/// # Returns
///
/// * `Ok(String)` - The lowercased hostname
/// * `Err(UrlError)` - The link is malformed or has no host
///
/// # Examples
///
/// ```
/// use funnelweb::url::host_of;
///
/// let host = host_of("https://Docs.Example.COM:8443/path?x=1").unwrap();
/// assert_eq!(host, "docs.example.com");
/// ```
pub fn host_of(link: &str) -> Result<String, UrlError> {
    let url = parse_http_url(link)?;
    match url.host_str() {
        Some(host) => Ok(host.to_lowercase()),
        None => Err(UrlError::MissingHost),
    }
}
