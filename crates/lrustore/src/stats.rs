//! Counters describing how a store has been used

use std::sync::atomic::{AtomicU64, Ordering};

/// Lookup and churn counters for a store.
///
/// `inserts - evictions - removals` is the number of entries held, as long
/// as the store has not been cleared since the counters were last reset.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
    removals: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl CacheStats {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a lookup that found its key
    pub fn record_hit(&self) {
        bump(&self.hits);
    }

    /// Count a lookup for a key the store did not hold
    pub fn record_miss(&self) {
        bump(&self.misses);
    }

    /// Count a put that admitted a new key
    pub fn record_insert(&self) {
        bump(&self.inserts);
    }

    /// Count a put that overwrote a held key
    pub fn record_update(&self) {
        bump(&self.updates);
    }

    /// Count an entry pushed out to make room for a new key
    pub fn record_eviction(&self) {
        bump(&self.evictions);
    }

    /// Count an entry dropped by an explicit remove
    pub fn record_removal(&self) {
        bump(&self.removals);
    }

    /// Lookups that found their key
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that came back empty
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Puts that admitted a new key
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Puts that overwrote a held key
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Least recently used entries pushed out by inserts
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Entries dropped by explicit removes
    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    /// Share of lookups that hit, in `0.0..=1.0`. Zero until the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits() + self.misses();
        match lookups {
            0 => 0.0,
            n => self.hits() as f64 / n as f64,
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.inserts,
            &self.updates,
            &self.evictions,
            &self.removals,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_hit_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        stats.record_removal();
        stats.reset();

        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.updates(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.removals(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
