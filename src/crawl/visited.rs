// src/crawl/visited.rs
// =============================================================================
// The visited tracker: one deduplication set shared by every branch of a
// single crawl.
//
// The only way in is `try_claim`, an atomic "insert if absent". A URL is
// claimed right before it is fetched, so two concurrent branches can never
// both decide to fetch the same page. There is no separate
// `contains` + `insert` pair: checking and inserting in two steps would let
// two branches both see "absent" and both fetch.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedTracker {
    claimed: DashSet<String>,
}

impl VisitedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the calling branch.
    ///
    /// Returns true exactly once per URL for the lifetime of the tracker.
    /// A false return means another branch already owns the URL and the
    /// caller must neither fetch it nor record it.
    pub fn try_claim(&self, url: &str) -> bool {
        self.claimed.insert(url.to_string())
    }

    /// Number of URLs claimed so far.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
