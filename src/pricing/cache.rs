use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

/// Default number of labels kept by a [`PriceCache`]
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Bounded least-recently-used cache of label -> price, owned by a resolver
pub struct PriceCache {
    inner: Mutex<LruCache<String, f64>>,
}

impl PriceCache {
    /// Create a cache holding at most `capacity` prices (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    // A panic while holding the lock cannot leave the LRU half-updated in a way
    // that matters for prices, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, f64>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.lock().get(label).copied()
    }

    pub fn insert(&self, label: impl Into<String>, price: f64) {
        self.lock().put(label.into(), price);
    }

    pub fn clear(&self) {
        self.lock().clear();
        tracing::info!("Price cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
