//! SharedLruStore: a locked, cloneable handle over LruStore

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::lru::LruStore;
use crate::stats::CacheStats;

/// Thread-safe LRU store handle with hit/miss statistics.
///
/// A single mutex guards the whole store: a successful `get` reorders the
/// recency list, so lookups need exclusive access just like writes. Values
/// are cloned out so no reference into the store outlives the lock.
pub struct SharedLruStore<K, V> {
    /// Store guarded by one lock
    inner: Arc<Mutex<LruStore<K, V>>>,

    /// Store statistics
    stats: Arc<CacheStats>,

    /// Fixed at construction
    capacity: usize,
}

impl<K, V> Clone for SharedLruStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
            capacity: self.capacity,
        }
    }
}

impl<K, V> SharedLruStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared store with the given capacity
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let store = LruStore::new(capacity)?;
        debug!(capacity, "created shared lru store");

        Ok(Self {
            inner: Arc::new(Mutex::new(store)),
            stats: Arc::new(CacheStats::new()),
            capacity,
        })
    }

    /// Look up a value, promoting its key on a hit
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.inner.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert or update a key, returning the evicted entry if any
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let mut store = self.inner.lock();
        let existed = store.contains(&key);
        let evicted = store.put(key, value);
        drop(store);

        if existed {
            self.stats.record_update();
        } else {
            self.stats.record_insert();
        }
        if evicted.is_some() {
            self.stats.record_eviction();
        }
        evicted
    }

    /// Remove a key, returning its value if it was held
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.inner.lock().remove(key);
        if removed.is_some() {
            self.stats.record_removal();
        }
        removed
    }

    /// Check whether a key is held without promoting it
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Snapshot of the keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Get store statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get store capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every entry and reset statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }
}
