//! Short-lived response cache keyed by request URL.
//!
//! Home, directory and detail pages all list the full brand and category
//! collections. Caching response bodies for a few seconds keeps a burst of
//! page views from turning into a burst of identical CMS requests.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex;

/// Cached bodies kept before the least recently used one is evicted.
const MAX_ENTRIES: usize = 256;

#[derive(Clone)]
pub(crate) struct ResponseCache {
    ttl: Duration,
    entries: Arc<Mutex<LruCache<String, CachedBody>>>,
}

struct CachedBody {
    stored_at: Instant,
    body: Arc<str>,
}

impl ResponseCache {
    /// A zero `ttl` disables caching.
    pub(crate) fn new(ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(MAX_ENTRIES).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns a fresh body and marks it recently used; expired bodies are dropped.
    pub(crate) async fn get(&self, key: &str) -> Option<Arc<str>> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().await;
        let fresh = entries
            .get(key)
            .map(|cached| (cached.stored_at.elapsed() < self.ttl, Arc::clone(&cached.body)));
        match fresh {
            Some((true, body)) => Some(body),
            Some((false, _)) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    pub(crate) async fn put(&self, key: String, body: Arc<str>) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(
            key.clone(),
            CachedBody {
                stored_at: Instant::now(),
                body,
            },
        ) {
            if evicted != key {
                tracing::debug!(evicted = %evicted, "response cache full, evicted least recently used");
            }
        }
    }
}
