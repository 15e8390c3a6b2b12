// src/crawl/mod.rs
// =============================================================================
// This module handles crawling: following links from a seed URL up to a
// maximum depth and recording what each page links to.
//
// Submodules:
// - validate: which strings are crawlable URLs, and their canonical form
// - visited: the shared "already claimed" set
// - orchestrator: the depth-by-depth traversal with bounded concurrency
// - result: PageRecord / CrawlResult, the crawl's output
// - observer: optional hooks for counting crawl events
// =============================================================================

mod observer;
mod orchestrator;
mod result;
mod validate;
mod visited;

pub use observer::{CrawlObserver, CrawlStats, NoopObserver};
pub use orchestrator::{run_crawl, run_crawl_blocking, Crawler};
pub use result::{CrawlResult, PageRecord};
pub use validate::{is_crawlable, normalize};
pub use visited::VisitedTracker;
