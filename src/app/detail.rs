//! Coin detail cache and the open detail panel.
//!
//! [`DetailCache`] guarantees at most one upstream request per coin id: an id is
//! either absent, pending (a request is in flight) or ready (a decoded detail is
//! held). Ready entries are retained in least-recently-used order up to a fixed
//! capacity; pending entries are never evicted, so a late response always finds
//! its marker.
//!
//! ```text
//! begin(id):  absent  → pending   (Issue)
//!             pending → pending   (InFlight)
//!             ready   → ready     (Cached, refreshes recency)
//!
//! complete(id, Ok):   → ready     (may evict the oldest ready entry)
//! complete(id, Err):  → absent    (next begin issues again)
//! ```

use crate::domain::{CoinDetail, CoinpaneError, Result};
use std::collections::{HashMap, VecDeque};

/// Ready entries kept when no capacity is configured.
pub const DEFAULT_DETAIL_CACHE_SIZE: usize = 16;

/// What the caller should do when a detail is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// The detail is already held; no request needed.
    Cached,
    /// A request for this id is already in flight; wait for it.
    InFlight,
    /// No request exists; the caller must issue one.
    Issue,
}

#[derive(Debug, Clone)]
enum DetailEntry {
    Pending,
    Ready(CoinDetail),
}

/// Id-keyed detail cache with in-flight deduplication.
#[derive(Debug, Clone)]
pub struct DetailCache {
    entries: HashMap<String, DetailEntry>,
    /// Ready ids, least recently used first.
    recency: VecDeque<String>,
    capacity: usize,
}

impl DetailCache {
    /// Creates a cache retaining up to `capacity` ready entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Registers interest in `id` and reports whether a request must be issued.
    ///
    /// ```
    /// use coinpane::app::detail::{DetailCache, FetchDecision};
    ///
    /// let mut cache = DetailCache::new(4);
    /// assert_eq!(cache.begin("bitcoin"), FetchDecision::Issue);
    /// assert_eq!(cache.begin("bitcoin"), FetchDecision::InFlight);
    /// ```
    pub fn begin(&mut self, id: &str) -> FetchDecision {
        match self.entries.get(id) {
            Some(DetailEntry::Ready(_)) => {
                self.touch(id);
                FetchDecision::Cached
            }
            Some(DetailEntry::Pending) => FetchDecision::InFlight,
            None => {
                self.entries.insert(id.to_string(), DetailEntry::Pending);
                FetchDecision::Issue
            }
        }
    }

    /// Records the outcome of the request for `id`.
    ///
    /// A failure clears the pending marker and is handed back so the caller
    /// can show it.
    ///
    /// # Errors
    ///
    /// Returns the failure it was given, unchanged.
    pub fn complete(&mut self, id: &str, result: Result<CoinDetail>) -> Result<()> {
        match result {
            Ok(detail) => {
                self.entries.insert(id.to_string(), DetailEntry::Ready(detail));
                self.touch(id);
                self.evict();
                Ok(())
            }
            Err(e) => {
                if matches!(self.entries.get(id), Some(DetailEntry::Pending)) {
                    self.entries.remove(id);
                }
                Err(e)
            }
        }
    }

    /// The held detail for `id`, if ready.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CoinDetail> {
        match self.entries.get(id) {
            Some(DetailEntry::Ready(detail)) => Some(detail),
            _ => None,
        }
    }

    /// Whether a request for `id` is in flight.
    #[must_use]
    pub fn is_pending(&self, id: &str) -> bool {
        matches!(self.entries.get(id), Some(DetailEntry::Pending))
    }

    /// Maximum number of ready entries retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of ready entries.
    #[must_use]
    pub fn ready_len(&self) -> usize {
        self.recency.len()
    }

    fn touch(&mut self, id: &str) {
        self.recency.retain(|held| held != id);
        self.recency.push_back(id.to_string());
    }

    fn evict(&mut self) {
        while self.recency.len() > self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                tracing::debug!(coin_id = %oldest, "evicting cached coin detail");
                self.entries.remove(&oldest);
            }
        }
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new(DEFAULT_DETAIL_CACHE_SIZE)
    }
}

/// The open detail panel: which coin it shows and the error, if its fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub error: Option<String>,
}

impl DetailView {
    #[must_use]
    pub fn open(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            error: None,
        }
    }

    /// Applies a failed fetch to the panel if it is for this panel's coin.
    pub fn apply_error(&mut self, error: &CoinpaneError) {
        if let CoinpaneError::DetailFetch { id, message } = error {
            if *id == self.id {
                self.error = Some(message.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> CoinDetail {
        CoinDetail {
            id: id.to_string(),
            name: id.to_uppercase(),
            symbol: id.to_string(),
            description: String::new(),
            image: None,
            price: Some(1.0),
            market_cap: None,
        }
    }

    fn failure(id: &str) -> CoinpaneError {
        CoinpaneError::DetailFetch {
            id: id.to_string(),
            message: "Failed to fetch coin details: 500".to_string(),
        }
    }

    #[test]
    fn second_begin_while_pending_does_not_issue() {
        let mut cache = DetailCache::default();
        assert_eq!(cache.begin("bitcoin"), FetchDecision::Issue);
        assert_eq!(cache.begin("bitcoin"), FetchDecision::InFlight);
        assert!(cache.is_pending("bitcoin"));
        assert_eq!(cache.begin("ethereum"), FetchDecision::Issue);
    }

    #[test]
    fn completed_detail_is_served_from_cache() {
        let mut cache = DetailCache::default();
        cache.begin("bitcoin");
        cache.complete("bitcoin", Ok(detail("bitcoin"))).unwrap();
        assert_eq!(cache.begin("bitcoin"), FetchDecision::Cached);
        assert_eq!(cache.get("bitcoin").map(|d| d.name.as_str()), Some("BITCOIN"));
    }

    #[test]
    fn failure_allows_retry() {
        let mut cache = DetailCache::default();
        cache.begin("bitcoin");
        assert!(cache.complete("bitcoin", Err(failure("bitcoin"))).is_err());
        assert!(!cache.is_pending("bitcoin"));
        assert_eq!(cache.begin("bitcoin"), FetchDecision::Issue);
    }

    #[test]
    fn failure_does_not_drop_a_ready_entry() {
        let mut cache = DetailCache::default();
        cache.begin("bitcoin");
        cache.complete("bitcoin", Ok(detail("bitcoin"))).unwrap();
        assert!(cache.complete("bitcoin", Err(failure("bitcoin"))).is_err());
        assert!(cache.get("bitcoin").is_some());
    }

    #[test]
    fn evicts_least_recently_used_ready_entry() {
        let mut cache = DetailCache::new(2);
        for id in ["a", "b"] {
            cache.begin(id);
            cache.complete(id, Ok(detail(id))).unwrap();
        }
        assert_eq!(cache.begin("a"), FetchDecision::Cached);

        cache.begin("c");
        cache.complete("c", Ok(detail("c"))).unwrap();

        assert_eq!(cache.ready_len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn pending_entries_survive_eviction() {
        let mut cache = DetailCache::new(1);
        cache.begin("slow");
        for id in ["a", "b", "c"] {
            cache.begin(id);
            cache.complete(id, Ok(detail(id))).unwrap();
        }
        assert!(cache.is_pending("slow"));
        assert_eq!(cache.ready_len(), 1);
    }

    #[test]
    fn view_only_takes_its_own_errors() {
        let mut view = DetailView::open("bitcoin");
        view.apply_error(&failure("ethereum"));
        assert_eq!(view.error, None);
        view.apply_error(&failure("bitcoin"));
        assert_eq!(view.error.as_deref(), Some("Failed to fetch coin details: 500"));
    }
}
