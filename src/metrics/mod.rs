//! Cache Metrics System
//!
//! Provides a metrics system for the replacement policies using BTreeMap-based
//! reporting. Every policy shares [`CoreCacheMetrics`] (kept by the cache base)
//! and reports through the common [`CacheMetrics`] trait; LFU adds its
//! frequency-level figures on top.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Simulator runs can be diffed line by line
//! - **Stable serialization**: CSV exports have predictable key ordering

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Common metrics tracked by all cache policies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache
    pub requests: u64,

    /// Number of lookups answered from the resident set
    pub cache_hits: u64,

    /// Number of entries written into the cache
    pub insertions: u64,

    /// Number of resident entries removed to make room for another
    pub evictions: u64,

    /// Maximum number of resident entries
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance for a cache of `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity as u64,
            ..Default::default()
        }
    }

    /// Records a cache hit - the key was resident before the lookup
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss - the lookup had to consult the backing store
    ///
    /// Misses are derived as (requests - cache_hits).
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an insertion - a fetched value was written into the cache
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an eviction - a resident entry was removed to make room
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Number of lookups that were not hits
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the cache hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Basic counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache policies implement for metrics reporting
///
/// It lets the simulator collect and compare metrics across policies without
/// knowing which one it is driving.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Policy name for identification ("Cyclic", "LRU", "MRU" or "LFU")
    fn algorithm_name(&self) -> &'static str;
}
