use url::Url;

use super::parse_http_url;
use crate::UrlError;

/// Canonicalizes a link into its base-URL form
///
/// The base URL is the identity under which a page is registered and
/// deduplicated, so every link variant that names the same document must
/// canonicalize to the same string:
///
/// 1. Parse the URL; reject non-HTTP(S) schemes and host-less URLs
/// 2. Lowercase the host (dot segments resolve during parsing)
/// 3. Collapse duplicate slashes in the path
/// 4. Remove any trailing slash, except for the root path
/// 5. Remove the fragment
///
/// The query string is kept: pages served for different queries are
/// different documents.
///
/// # Arguments
///
/// * `link` - The link as found in a page or on the command line
///
/// # Returns
///
/// * `Ok(String)` - The canonical base URL
/// * `Err(UrlError)` - The link cannot identify a fetchable page
///
/// # Examples
///
/// ```
/// use funnelweb::url::to_base_url;
///
/// let base = to_base_url("http://EXAMPLE.com/docs/#intro").unwrap();
/// assert_eq!(base, "http://example.com/docs");
/// ```
pub fn to_base_url(link: &str) -> Result<String, UrlError> {
    let url = parse_http_url(link)?;
    Ok(base_url_of(&url))
}

/// Canonicalizes an already-parsed URL into its base-URL form
///
/// Same rules as [`to_base_url`]; usable where a [`Url`] is already in
/// hand (for example the final URL after redirects).
pub fn base_url_of(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.set_path(&canonical_path(url.path()));
    String::from(url)
}

/// Collapses duplicate slashes and trims the trailing slash from a path
///
/// An empty or all-slash path becomes "/", so a bare host and its root
/// ("http://e.com" and "http://e.com/") agree on one base URL.
fn canonical_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}
