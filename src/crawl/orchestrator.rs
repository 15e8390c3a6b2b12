// src/crawl/orchestrator.rs
// =============================================================================
// The crawl engine: walks the link graph from a seed URL, one depth level at
// a time.
//
// How it works:
// 1. The seed is validated and forms the first wave (depth 0)
// 2. Every URL in a wave becomes a task: claim it, fetch it, extract links
// 3. Tasks in a wave run concurrently, at most `concurrency` at once
// 4. The links found by a wave (if depth budget remains) form the next wave
// 5. Repeat until a wave finds nothing new or the depth limit is reached
//
// Invariants:
// - A URL is claimed in the visited tracker before it is fetched, and only
//   the claiming task may fetch or record it
// - A wave starts only after the previous one has finished, so every URL is
//   claimed at its shortest hop distance from the seed
// - A failed fetch is recorded on its own page and never stops other tasks
//
// Termination: each URL can be claimed once and depth grows every wave, so
// the loop ends even when pages link to each other in cycles.
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

use super::observer::{CrawlObserver, NoopObserver};
use super::result::{CrawlResult, PageRecord};
use super::validate;
use super::visited::VisitedTracker;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{HtmlLinkExtractor, LinkExtractor};
use crate::fetch::{HttpFetcher, PageFetcher};

pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    observer: Arc<dyn CrawlObserver>,
    concurrency: usize,
    strip_fragments: bool,
}

impl Crawler {
    /// Creates a crawler around any page fetcher, using the HTML link
    /// extractor and no observer.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlConfig) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(HtmlLinkExtractor::new()),
            observer: Arc::new(NoopObserver),
            concurrency: config.effective_concurrency(),
            strip_fragments: config.strip_fragments,
        }
    }

    /// Creates a crawler that fetches over HTTP with reqwest.
    pub fn from_config(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Crawls everything reachable from `seed` within `max_depth` hops.
    ///
    /// Only an invalid seed makes this fail. Once the crawl starts it always
    /// returns a result; pages that could not be fetched carry their error.
    pub async fn run(&self, seed: &str, max_depth: usize) -> Result<CrawlResult, CrawlError> {
        let seed = validate::normalize(seed, self.strip_fragments)
            .ok_or_else(|| CrawlError::InvalidUrl(seed.to_string()))?;

        tracing::info!(seed = %seed, max_depth, concurrency = self.concurrency, "starting crawl");

        let visited = VisitedTracker::new();
        let mut result = CrawlResult::new();
        let mut frontier = vec![seed];
        let mut depth = 0;

        while !frontier.is_empty() {
            tracing::debug!(depth, pending = frontier.len(), "crawling wave");

            let wave: Vec<PageRecord> = stream::iter(frontier)
                .map(|url| self.crawl_one(url, depth, max_depth, &visited))
                .buffer_unordered(self.concurrency)
                .filter_map(future::ready)
                .collect()
                .await;

            frontier = if depth < max_depth {
                next_frontier(&wave)
            } else {
                Vec::new()
            };
            result.extend(wave);
            depth += 1;
        }

        tracing::info!(
            pages = result.len(),
            errors = result.error_count(),
            claimed = visited.len(),
            "crawl finished"
        );
        Ok(result)
    }

    /// Runs the crawl on a fresh tokio runtime and blocks until it is done.
    ///
    /// Must not be called from inside an async context.
    pub fn run_blocking(&self, seed: &str, max_depth: usize) -> Result<CrawlResult, CrawlError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(seed, max_depth))
    }

    // One URL's life: claim, fetch, extract.
    //
    // Returns None when the URL is past the depth limit or another task
    // already claimed it. Neither case is an error.
    async fn crawl_one(
        &self,
        url: String,
        depth: usize,
        max_depth: usize,
        visited: &VisitedTracker,
    ) -> Option<PageRecord> {
        if depth > max_depth {
            return None;
        }
        if !visited.try_claim(&url) {
            tracing::trace!(url = %url, "already claimed");
            return None;
        }

        self.observer.fetch_attempted(&url, depth);
        tracing::debug!(url = %url, depth, "fetching");

        let record = match self.fetcher.fetch(&url).await {
            Ok(body) => {
                let links = self.outbound_links(&url, &body);
                PageRecord::fetched(url, depth, links)
            }
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "fetch failed");
                self.observer.fetch_failed(&url, &error);
                PageRecord::failed(url, depth, error)
            }
        };

        self.observer.record_produced(&record);
        Some(record)
    }

    // Extracts links and keeps the crawlable ones, normalized
    fn outbound_links(&self, url: &str, body: &str) -> Vec<String> {
        // Claimed URLs were normalized, so this only fails for a URL that
        // never should have been claimed
        let Ok(base) = Url::parse(url) else {
            return Vec::new();
        };

        self.extractor
            .extract_links(body, &base)
            .into_iter()
            .filter_map(|link| validate::normalize(&link, self.strip_fragments))
            .collect()
    }
}

// Links to schedule for the next depth level, first occurrence only.
// Whether each one is actually fetched is decided by its claim.
fn next_frontier(wave: &[PageRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    wave.iter()
        .flat_map(|record| record.outbound_links.iter())
        .filter(|link| seen.insert(link.as_str()))
        .cloned()
        .collect()
}

/// Crawls from `seed` with default settings over HTTP.
pub async fn run_crawl(seed: &str, max_depth: usize) -> Result<CrawlResult, CrawlError> {
    Crawler::from_config(&CrawlConfig::default())?
        .run(seed, max_depth)
        .await
}

/// Synchronous entry point: builds an HTTP crawler from `config` and blocks
/// until every branch has finished.
pub fn run_crawl_blocking(
    seed: &str,
    max_depth: usize,
    config: &CrawlConfig,
) -> Result<CrawlResult, CrawlError> {
    Crawler::from_config(config)?.run_blocking(seed, max_depth)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. buffer_unordered(n)
//    - Polls up to n crawl_one futures at once and yields records as they
//      finish, in any order
//    - This is the worker pool: a wave of 10,000 links still has at most n
//      fetches in flight
//
// 2. Arc<dyn PageFetcher>
//    - A shared pointer to "some type implementing PageFetcher"
//    - Lets the same Crawler run against reqwest or an in-memory stub
//
// 3. Why Option<PageRecord> from crawl_one?
//    - Losing a claim race is normal (cycles, diamonds), not an error
//    - filter_map(future::ready) simply drops the Nones
// -----------------------------------------------------------------------------
