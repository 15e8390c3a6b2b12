// src/extract/mod.rs
// =============================================================================
// Link extraction: turns a fetched page into the list of URLs it links to.
//
// Submodules:
// - html: scraper-based extractor for HTML documents
// =============================================================================

mod html;

use url::Url;

pub use html::HtmlLinkExtractor;

/// Parses page content into outbound link targets.
///
/// Targets are resolved against `base` and returned in document order with
/// duplicates kept. Deduplication and crawlability checks happen in the
/// crawler. Markup that cannot be understood is skipped, never fatal.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, content: &str, base: &Url) -> Vec<String>;
}
