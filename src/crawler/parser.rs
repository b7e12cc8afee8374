//! HTML parsing for the crawl
//!
//! Extracts the two things the indexer needs from a fetched document:
//! - outbound links, resolved to absolute URLs
//! - the document's visible text, ready for tokenization

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use url::Url;

/// Links and text extracted from one HTML document
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Outbound links as absolute URLs, in document order
    pub links: Vec<String>,

    /// Visible text with tags stripped; whitespace is not normalized
    pub text: String,
}

/// Parses an HTML document into its links and visible text
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The document's URL, for resolving relative links
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, base_url),
        text: extract_text(&document),
    }
}

/// Extracts all followable links from `<a href>` tags
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, or None if it is not followable
///
/// Excluded: empty hrefs, fragment-only anchors, `javascript:`, `mailto:`,
/// `tel:` and `data:` schemes, and anything that does not resolve to an
/// HTTP(S) URL.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

/// Collects the document's visible text
///
/// Walks the DOM and gathers text nodes, skipping `<script>`, `<style>`
/// and `<noscript>` subtrees whose contents are never visible. The
/// `<title>` counts as page text.
fn extract_text(document: &Html) -> String {
    let mut text = String::new();
    collect_text(document.tree.root(), &mut text);
    text.truncate(text.trim_end().len());
    text
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(fragment) => {
                out.push_str(&fragment);
                out.push(' ');
            }
            Node::Element(element) => {
                if !matches!(element.name(), "script" | "style" | "noscript") {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_links_keep_document_order() {
        let html = r#"
            <html><body>
                <a href="/first">1</a>
                <a href="/second">2</a>
                <a href="/third">3</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(
            parsed.links,
            vec![
                "https://example.com/first",
                "https://example.com/second",
                "https://example.com/third"
            ]
        );
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:a@example.com">Mail</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,hi">Data</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_anchor() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_empty_href() {
        let html = r#"<html><body><a href="  ">Blank</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_text_includes_body_and_title() {
        let html = r#"<html><head><title>Fish Facts</title></head><body><p>Salmon swim upstream.</p></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.text.contains("Fish Facts"));
        assert!(parsed.text.contains("Salmon swim upstream."));
    }

    #[test]
    fn test_text_skips_script_and_style() {
        let html = r#"
            <html><body>
                <p>visible</p>
                <script>var hidden = "scriptword";</script>
                <style>.hidden { color: red; }</style>
                <noscript>noscriptword</noscript>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.text.contains("visible"));
        assert!(!parsed.text.contains("scriptword"));
        assert!(!parsed.text.contains("hidden"));
        assert!(!parsed.text.contains("noscriptword"));
    }

    #[test]
    fn test_text_from_nested_elements() {
        let html = r#"<html><body><div><p>outer <em>inner</em> tail</p></div></body></html>"#;
        let parsed = parse_page(html, &base_url());
        let words: Vec<&str> = parsed.text.split_whitespace().collect();
        assert_eq!(words, vec!["outer", "inner", "tail"]);
    }

    #[test]
    fn test_anchor_text_is_page_text() {
        let html = r#"<html><body><a href="/x">clickable words</a></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert!(parsed.text.contains("clickable words"));
    }
}
