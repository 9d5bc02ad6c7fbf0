//! HTML parser for extracting anchors
//!
//! Every `<a>` element is reported, in document order. The `href` is resolved
//! the way a DOM `href` property resolves it: against the document base URL,
//! which is the first `<base href>` if present and the page URL otherwise.
//!
//! No filtering happens here. `mailto:` links, `javascript:` links and
//! fragment-only links all come back resolved; it is up to the scope to decide
//! what gets crawled.

use crate::crawler::browser::Anchor;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all anchors from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the document was loaded from
///
/// # Example
///
/// ```
/// use find404_crawler::crawler::extract_anchors;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/about">About</a><a>Nothing</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let anchors = extract_anchors(html, &page_url);
///
/// assert_eq!(anchors[0].href.as_deref(), Some("https://example.com/about"));
/// assert_eq!(anchors[1].href, None);
/// ```
pub fn extract_anchors(html: &str, page_url: &Url) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let base_url = document_base(&document, page_url);

    let Ok(a_selector) = Selector::parse("a") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .map(|element| Anchor {
            href: element
                .value()
                .attr("href")
                .map(|href| resolve_href(href, &base_url)),
        })
        .collect()
}

/// Determines the base URL used to resolve relative hrefs
fn document_base(document: &Html, page_url: &Url) -> Url {
    let Ok(base_selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Resolves an href against the base URL
///
/// Values that cannot be resolved are returned as written.
fn resolve_href(href: &str, base_url: &Url) -> String {
    match base_url.join(href.trim()) {
        Ok(absolute_url) => absolute_url.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    fn hrefs(html: &str) -> Vec<Option<String>> {
        extract_anchors(html, &page_url())
            .into_iter()
            .map(|anchor| anchor.href)
            .collect()
    }

    #[test]
    fn test_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert_eq!(hrefs(html), vec![Some("https://other.com/page".to_string())]);
    }

    #[test]
    fn test_root_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        assert_eq!(hrefs(html), vec![Some("https://example.com/other".to_string())]);
    }

    #[test]
    fn test_path_relative_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        assert_eq!(
            hrefs(html),
            vec![Some("https://example.com/docs/other".to_string())]
        );
    }

    #[test]
    fn test_fragment_only_link_resolves_to_page() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert_eq!(
            hrefs(html),
            vec![Some("https://example.com/docs/page#section".to_string())]
        );
    }

    #[test]
    fn test_missing_href() {
        let html = r#"<html><body><a name="top">Anchor</a></body></html>"#;
        assert_eq!(hrefs(html), vec![None]);
    }

    #[test]
    fn test_empty_href_resolves_to_page() {
        let html = r#"<html><body><a href="">Self</a></body></html>"#;
        assert_eq!(
            hrefs(html),
            vec![Some("https://example.com/docs/page".to_string())]
        );
    }

    #[test]
    fn test_special_schemes_are_kept() {
        let html = r#"<html><body>
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">Script</a>
        </body></html>"#;
        assert_eq!(
            hrefs(html),
            vec![
                Some("mailto:test@example.com".to_string()),
                Some("javascript:void(0)".to_string()),
            ]
        );
    }

    #[test]
    fn test_unresolvable_href_is_returned_verbatim() {
        let html = r#"<html><body><a href="http://[broken">Broken</a></body></html>"#;
        assert_eq!(hrefs(html), vec![Some("http://[broken".to_string())]);
    }

    #[test]
    fn test_base_element_changes_resolution() {
        let html = r#"<html><head><base href="https://cdn.example.com/v2/"></head>
            <body><a href="guide">Guide</a></body></html>"#;
        assert_eq!(
            hrefs(html),
            vec![Some("https://cdn.example.com/v2/guide".to_string())]
        );
    }

    #[test]
    fn test_document_order_and_duplicates() {
        let html = r#"
            <html>
            <body>
                <a href="/b">B</a>
                <a href="/a">A</a>
                <a href="/b">B again</a>
            </body>
            </html>
        "#;
        assert_eq!(
            hrefs(html),
            vec![
                Some("https://example.com/b".to_string()),
                Some("https://example.com/a".to_string()),
                Some("https://example.com/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_anchors() {
        assert!(hrefs("<html><body><p>Nothing here</p></body></html>").is_empty());
        assert!(hrefs("").is_empty());
    }
}
