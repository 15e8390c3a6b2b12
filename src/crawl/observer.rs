// src/crawl/observer.rs
// =============================================================================
// Lifecycle hooks for whoever wraps the crawler.
//
// The crawler reports three events and does nothing else with them:
// - a fetch is about to start
// - a fetch failed
// - a page record was produced
//
// Counters, progress bars or metrics exporters plug in here without the crawl
// engine knowing about them. Every method has an empty default, so an
// observer only implements what it cares about.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use super::result::PageRecord;
use crate::error::FetchError;

pub trait CrawlObserver: Send + Sync {
    fn fetch_attempted(&self, _url: &str, _depth: usize) {}

    fn fetch_failed(&self, _url: &str, _error: &FetchError) {}

    fn record_produced(&self, _record: &PageRecord) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}

/// Running totals of crawl events, safe to read while the crawl is going.
#[derive(Debug, Default)]
pub struct CrawlStats {
    attempted: AtomicUsize,
    failed: AtomicUsize,
    records: AtomicUsize,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetches_attempted(&self) -> usize {
        self.attempted.load(Ordering::Relaxed)
    }

    pub fn fetches_failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn records_produced(&self) -> usize {
        self.records.load(Ordering::Relaxed)
    }
}

impl CrawlObserver for CrawlStats {
    fn fetch_attempted(&self, _url: &str, _depth: usize) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    fn fetch_failed(&self, _url: &str, _error: &FetchError) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_produced(&self, _record: &PageRecord) {
        self.records.fetch_add(1, Ordering::Relaxed);
    }
}
