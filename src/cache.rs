//! Shared cache for generated responses, keyed by page URL and content hash.
//!
//! Writers never coordinate: the last `set` for a key wins.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

/// How long a cached response stays valid unless told otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key for a response generated from `content` scraped at `url`
pub fn cache_key(url: &str, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}:{}", url, hex::encode(hasher.finalize()))
}

pub trait ResponseCache: Send + Sync {
    /// The stored value, unless missing or expired
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: String, value: String, ttl: Duration);

    fn set_default(&self, key: String, value: String) {
        self.set(key, value, DEFAULT_TTL);
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process cache safe to share between concurrent scrapes
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry and return how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            ::log::debug!("Purged {} expired cache entries", removed);
        }
        removed
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let value = {
            let entry = self.entries.get(key)?;
            (!entry.is_expired(now)).then(|| entry.value.clone())
        };
        if value.is_none() {
            ::log::trace!("Cache entry {} expired", key);
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        value
    }

    fn set(&self, key: String, value: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(key, Entry { value, expires_at });
    }
}
