use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bounded LRU keyed by normalised query text. A capacity of zero disables caching.
pub struct QueryCache<T> {
    cache: Option<Mutex<LruCache<String, T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl<T> QueryCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock();
        if let Some(value) = cache.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(value.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn set(&self, key: &str, value: T) {
        if let Some(cache) = &self.cache {
            cache.lock().put(key.to_string(), value);
        }
    }

    pub fn make_key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        let size = self.cache.as_ref().map_or(0, |cache| cache.lock().len());

        CacheStats {
            hits,
            misses,
            size,
            hit_rate,
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
