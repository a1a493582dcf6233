use lru::LruCache;
use parking_lot::Mutex;
use roaring::RoaringBitmap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::stats::CacheStats;

/// Name query cache for avoiding repeated substring-key scans.
///
/// Keyed by the normalized query. The owning store clears it on every
/// mutation, so entries always reflect the current index.
pub struct NameQueryCache {
    cache: Option<Mutex<LruCache<String, RoaringBitmap>>>,
    capacity: usize,
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
}

impl NameQueryCache {
    /// A capacity of 0 disables caching
    pub fn new(capacity: usize) -> Self {
        NameQueryCache {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            capacity,
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn get(&self, query: &str) -> Option<RoaringBitmap> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock();
        if let Some(ordinals) = cache.get(query) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(ordinals.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, query: String, ordinals: RoaringBitmap) {
        if let Some(cache) = &self.cache {
            cache.lock().put(query, ordinals);
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.cache.as_ref().map(|cache| cache.lock().len()).unwrap_or(0),
            capacity: self.capacity,
        }
    }
}

impl std::fmt::Debug for NameQueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameQueryCache")
            .field("stats", &self.stats())
            .finish()
    }
}
