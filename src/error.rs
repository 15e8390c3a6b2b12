// src/error.rs
// =============================================================================
// Error types for the crawl library.
//
// Two very different kinds of failure exist:
// - FetchError: one page could not be retrieved. It is captured into that
//   page's record and never stops the rest of the crawl.
// - CrawlError: the crawl could not start at all (bad seed URL, HTTP client
//   or runtime could not be built). Once a crawl starts it always returns a
//   result.
// =============================================================================

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timeout")]
    Timeout,
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("too many redirects")]
    TooManyRedirects,
}

// Fetch errors travel as plain strings in the JSON output,
// e.g. { "fetchError": "http status 404" }
impl Serialize for FetchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors that prevent a crawl from starting.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL '{0}': expected an absolute URL with a scheme and a host")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
