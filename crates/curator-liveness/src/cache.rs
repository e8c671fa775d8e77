//! # Verdict Cache
//!
//! A map from URL to its last probe verdict, each entry valid for a fixed
//! freshness window. The cache is the only mutable state shared between
//! workers; entries are append-only per key and idempotent, so a race on
//! the same URL just refreshes the window twice.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// How long a probe verdict stays fresh.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    /// `None` means the URL was alive.
    verdict: Option<String>,
    refresh_at: Instant,
}

/// Thread-safe per-URL verdict cache with expiry.
#[derive(Debug)]
pub struct UrlCache {
    freshness: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl UrlCache {
    /// A cache with the default 5-minute freshness window.
    pub fn new() -> Self {
        Self::with_freshness(DEFAULT_FRESHNESS)
    }

    /// A cache with a custom freshness window (tests use a short one).
    pub fn with_freshness(freshness: Duration) -> Self {
        Self {
            freshness,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh verdict. `None` means absent or stale; `Some(v)` is
    /// the cached verdict, itself `None` when the URL was alive.
    pub fn fresh_verdict(&self, url: &str) -> Option<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get(url)?;
        if entry.refresh_at > Instant::now() {
            Some(entry.verdict.clone())
        } else {
            None
        }
    }

    /// Store a verdict, restarting the freshness window. Last writer wins.
    pub fn store(&self, url: &str, verdict: Option<String>) {
        let entry = CacheEntry {
            verdict,
            refresh_at: Instant::now() + self.freshness,
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(url.to_string(), entry);
    }

    /// Number of cached URLs, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UrlCache {
    fn default() -> Self {
        Self::new()
    }
}
