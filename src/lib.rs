//! Maps the graph of pages reachable from a seed URL.
//!
//! Starting from one page, the crawler follows hyperlinks up to a bounded
//! number of hops, fetches every distinct URL at most once, and returns one
//! [`PageRecord`] per page: its discovery depth, its outbound links, and the
//! fetch error if it could not be retrieved.
//!
//! # Usage
//!
//! ```rust,ignore
//! use link_mapper::{run_crawl_blocking, CrawlConfig};
//!
//! let result = run_crawl_blocking("https://example.com", 2, &CrawlConfig::default())?;
//! for record in result.records() {
//!     println!("{} (depth {}): {} links", record.url, record.depth, record.outbound_links.len());
//! }
//! ```
//!
//! Fetching and link extraction sit behind the [`PageFetcher`] and
//! [`LinkExtractor`] traits, so either can be replaced, for example with an
//! in-memory stub in tests.

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod report;

pub use config::CrawlConfig;
pub use crawl::{
    is_crawlable, run_crawl, run_crawl_blocking, CrawlObserver, CrawlResult, CrawlStats, Crawler,
    PageRecord,
};
pub use error::{CrawlError, FetchError};
pub use extract::{HtmlLinkExtractor, LinkExtractor};
pub use fetch::{HttpFetcher, PageFetcher};
