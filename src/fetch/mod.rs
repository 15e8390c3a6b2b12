// src/fetch/mod.rs
// =============================================================================
// Page fetching: the crawler's only network boundary.
//
// The crawler talks to a `PageFetcher` trait object rather than to reqwest
// directly, so tests can hand it an in-memory stub and never touch the
// network.
//
// Submodules:
// - http: the reqwest-backed fetcher used by the CLI
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Retrieves the raw content of one page.
///
/// Implementations make a single attempt per call. Retrying, caching or
/// deduplicating is not their job.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
