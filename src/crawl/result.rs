// src/crawl/result.rs
// =============================================================================
// The crawl's output: one PageRecord per claimed URL, gathered into a
// CrawlResult keyed by URL.
//
// JSON shape (what --json prints):
//   {
//     "https://example.com/": {
//       "depth": 0,
//       "outboundLinks": ["https://example.com/about"],
//       "fetchError": null
//     },
//     ...
//   }
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::FetchError;

/// Outcome of crawling one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Already the map key in serialized output
    #[serde(skip)]
    pub url: String,
    /// Hops from the seed at which this URL was first discovered (seed = 0)
    pub depth: usize,
    /// Crawlable links on the page, in document order
    pub outbound_links: Vec<String>,
    pub fetch_error: Option<FetchError>,
}

impl PageRecord {
    pub fn fetched(url: String, depth: usize, outbound_links: Vec<String>) -> Self {
        Self {
            url,
            depth,
            outbound_links,
            fetch_error: None,
        }
    }

    pub fn failed(url: String, depth: usize, error: FetchError) -> Self {
        Self {
            url,
            depth,
            outbound_links: Vec::new(),
            fetch_error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.fetch_error.is_none()
    }
}

/// Every page record of one crawl, keyed by URL.
///
/// A BTreeMap keeps the JSON output and reports in a stable order no matter
/// which branch finished first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrawlResult {
    records: BTreeMap<String, PageRecord>,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record.
    ///
    /// The visited tracker guarantees a URL is claimed once, so a second
    /// record for the same URL is a bug in the tracker. Debug and test
    /// builds panic on it instead of silently overwriting.
    pub fn insert(&mut self, record: PageRecord) {
        let previous = self.records.insert(record.url.clone(), record);
        debug_assert!(
            previous.is_none(),
            "duplicate page record for {}",
            previous.map(|r| r.url).unwrap_or_default()
        );
    }

    /// Union of two partial results. Same duplicate rule as `insert`.
    pub fn merge(&mut self, other: CrawlResult) {
        for record in other.records.into_values() {
            self.insert(record);
        }
    }

    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.records.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.records.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose fetch failed
    pub fn error_count(&self) -> usize {
        self.records.values().filter(|r| !r.is_ok()).count()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.values()
    }
}

impl FromIterator<PageRecord> for CrawlResult {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        let mut result = CrawlResult::new();
        for record in iter {
            result.insert(record);
        }
        result
    }
}

impl Extend<PageRecord> for CrawlResult {
    fn extend<I: IntoIterator<Item = PageRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
