// src/config.rs
// =============================================================================
// Tunable settings for one crawl.
//
// Defaults:
// - 10 second timeout per request
// - a fixed User-Agent identifying this tool
// - up to 10 redirects followed transparently
// - at most 50 fetches in flight at once
// - "#fragment" parts stripped from URLs
// =============================================================================

use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("link-mapper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Per-request timeout; a slower page becomes `FetchError::Timeout`
    pub timeout: Duration,
    /// Value of the User-Agent header sent with every request
    pub user_agent: String,
    /// Redirects followed before giving up with `FetchError::TooManyRedirects`
    pub max_redirects: usize,
    /// Upper bound on concurrent in-flight fetches
    pub concurrency: usize,
    /// Drop "#fragment" so anchors on one page share a visited key
    pub strip_fragments: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            concurrency: 50,
            strip_fragments: true,
        }
    }
}

impl CrawlConfig {
    // A pool of zero workers would never make progress
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
