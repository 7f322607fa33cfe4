use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::model::preview::PagePreview;

/// Bounded preview cache: LRU eviction with a per-entry TTL.
///
/// Keys are normalized URLs. Expired entries are evicted lazily on lookup
/// and treated as misses; the LRU capacity bounds memory under sustained
/// unique-URL traffic.
#[derive(Clone)]
pub struct PreviewCache {
    cache: Arc<Mutex<LruCache<String, CacheEntry>>>,
    ttl: Duration,
}

struct CacheEntry {
    preview: PagePreview,
    expires_at: Instant,
}

impl PreviewCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(128).unwrap());
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(cap))),
            ttl,
        }
    }

    /// Returns the cached preview for `url` if present and unexpired.
    /// An expired entry is removed and reported as a miss.
    pub fn get(&self, url: &str) -> Option<PagePreview> {
        let mut cache = self.cache.lock().unwrap();
        match cache.get(url) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.preview.clone()),
            Some(_) => {
                cache.pop(url);
                None
            }
            None => None,
        }
    }

    /// Stores `preview` under `url` with the fixed TTL, overwriting any
    /// previous entry.
    pub fn insert(&self, url: &str, preview: PagePreview) {
        let mut cache = self.cache.lock().unwrap();
        cache.put(
            url.to_string(),
            CacheEntry {
                preview,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(title: &str) -> PagePreview {
        PagePreview {
            title: title.to_string(),
            gallery: "test".to_string(),
            image: None,
            summary: None,
        }
    }

    #[test]
    fn returns_stored_entry_within_ttl() {
        let cache = PreviewCache::new(4, Duration::from_secs(60));
        cache.insert("https://example.com", preview("a"));

        let hit = cache.get("https://example.com").unwrap();
        assert_eq!(hit.title, "a");
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = PreviewCache::new(4, Duration::from_millis(1));
        cache.insert("https://example.com", preview("a"));

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("https://example.com").is_none());
        // A second lookup stays a miss; the entry was evicted, not just hidden.
        assert!(cache.get("https://example.com").is_none());
    }

    #[test]
    fn capacity_bound_evicts_least_recently_used() {
        let cache = PreviewCache::new(2, Duration::from_secs(60));
        cache.insert("a", preview("a"));
        cache.insert("b", preview("b"));
        cache.get("a");
        cache.insert("c", preview("c"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn insert_overwrites_previous_entry() {
        let cache = PreviewCache::new(4, Duration::from_secs(60));
        cache.insert("a", preview("old"));
        cache.insert("a", preview("new"));

        assert_eq!(cache.get("a").unwrap().title, "new");
    }
}
