//! Least Frequently Used (LFU) Cache Implementation
//!
//! An LFU cache evicts the entry with the smallest access count. Entries that
//! share an access count are kept in a per-count bucket ordered by when they
//! reached that count, and the oldest one in the lowest bucket is evicted
//! first.
//!
//! # How the Algorithm Works
//!
//! ## Data Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  map: HashMap<K, Entry { value, frequency, node }>           │
//! │                                                              │
//! │  buckets: BTreeMap<frequency, List<K>>                       │
//! │    1 ─► [ D ◄─► E ]          oldest at the front             │
//! │    3 ─► [ A ◄─► C ]                                          │
//! │    7 ─► [ B ]                                                │
//! │                                                              │
//! │  min_frequency = 1                                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **Hit**: move the key from bucket `f` to the back of bucket `f + 1`. If
//!   bucket `f` empties it is dropped, and if it was the lowest bucket the
//!   minimum becomes `f + 1`, where the promoted key now sits.
//! - **Miss**: if full, remove the front key of the `min_frequency` bucket.
//!   Then insert the new key at the back of bucket 1 and reset
//!   `min_frequency` to 1.
//!
//! ## Eviction Example
//!
//! ```text
//! capacity 2:  lookup A, lookup B      buckets: 1 ─► [A, B]
//!              lookup C (miss, full)   A is the oldest with count 1
//!                                      buckets: 1 ─► [B, C]
//! ```
//!
//! # Performance Characteristics
//!
//! | Operation | Time |
//! |-----------|------|
//! | Hit       | O(log F) where F is the number of distinct counts |
//! | Miss      | O(log F) plus one backing store lookup |
//!
//! # When to Use LFU
//!
//! **Good for:**
//! - Workloads with a stable set of popular keys
//!
//! **Not ideal for:**
//! - Shifting popularity: an entry that was hot long ago keeps its high count
//!   and can outlive entries that are hot now

extern crate alloc;

use crate::base::CacheBase;
use crate::config::{CacheConfig, PREALLOCATION_LIMIT};
use crate::list::{List, NodeId};
use crate::metrics::{CacheMetrics, CoreCacheMetrics, LfuCacheMetrics};
use crate::policy::{CachePolicy, PolicyKind};
use crate::store::BackingStore;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;
use core::hash::Hash;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

struct LfuEntry<V> {
    value: V,
    frequency: usize,
    /// Position in `buckets[frequency]`.
    node: NodeId,
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// # Examples
///
/// ```
/// use policy_cache::LfuCache;
/// use policy_cache::store::Memory;
///
/// let mut cache = LfuCache::new(2, Memory::new(vec!["a", "b", "c"]));
///
/// cache.lookup(&0).unwrap();
/// cache.lookup(&1).unwrap();
/// cache.lookup(&1).unwrap(); // 1 now has count 2
/// cache.lookup(&2).unwrap(); // 0 has the lowest count and is evicted
///
/// assert!(!cache.contains(&0));
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.frequency(&2), Some(1));
/// assert_eq!(cache.min_frequency(), Some(1));
/// ```
pub struct LfuCache<K, S: BackingStore<K>> {
    base: CacheBase<S>,
    config: CacheConfig,
    map: HashMap<K, LfuEntry<S::Value>>,
    buckets: BTreeMap<usize, List<K>>,
    /// Lowest access count among resident entries. Only read while non-empty.
    min_frequency: usize,
    lfu_metrics: LfuCacheMetrics,
}

impl<K, S> LfuCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    pub fn new(capacity: usize, store: S) -> Self {
        Self::init(CacheConfig::new(capacity), store)
    }

    /// Creates an LFU cache from a configuration.
    pub fn init(config: CacheConfig, store: S) -> Self {
        let capacity = config.capacity;
        tracing::debug!(policy = "LFU", capacity, "created cache");
        LfuCache {
            base: CacheBase::new(store, capacity),
            config,
            map: HashMap::with_capacity(capacity.min(PREALLOCATION_LIMIT)),
            buckets: BTreeMap::new(),
            min_frequency: 0,
            lfu_metrics: LfuCacheMetrics::new(),
        }
    }

    /// Looks up `key`, consulting the backing store only on a miss.
    ///
    /// # Errors
    ///
    /// Returns the backing store's error unchanged. A failed fetch neither
    /// evicts nor inserts.
    pub fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        if let Some(entry) = self.map.get_mut(key) {
            let old_frequency = entry.frequency;
            let new_frequency = old_frequency + 1;

            if let Some(bucket) = self.buckets.get_mut(&old_frequency) {
                bucket.remove(entry.node);
                if bucket.is_empty() {
                    self.buckets.remove(&old_frequency);
                    if old_frequency == self.min_frequency {
                        self.min_frequency = new_frequency;
                    }
                }
            }

            entry.node = self
                .buckets
                .entry(new_frequency)
                .or_default()
                .push_back(key.clone());
            entry.frequency = new_frequency;
            let value = entry.value.clone();

            self.base.record_hit();
            self.lfu_metrics.record_frequency_increment();
            self.lfu_metrics.update_frequency_levels(&self.buckets);
            return Ok(value);
        }

        let value = self.base.fetch(key)?;
        if self.config.capacity == 0 {
            return Ok(value);
        }

        if self.map.len() >= self.config.capacity {
            self.evict_least_frequent();
        }

        let node = self.buckets.entry(1).or_default().push_back(key.clone());
        self.map.insert(
            key.clone(),
            LfuEntry {
                value: value.clone(),
                frequency: 1,
                node,
            },
        );
        self.min_frequency = 1;
        self.base.record_insertion();
        self.lfu_metrics.record_admission();
        self.lfu_metrics.update_frequency_levels(&self.buckets);
        Ok(value)
    }

    fn evict_least_frequent(&mut self) {
        let Some(bucket) = self.buckets.get_mut(&self.min_frequency) else {
            return;
        };
        let Some(victim) = bucket.remove_first() else {
            return;
        };
        if bucket.is_empty() {
            self.buckets.remove(&self.min_frequency);
        }
        self.map.remove(&victim);
        self.base.record_eviction();
        self.lfu_metrics.record_removal(self.min_frequency as u64);
        tracing::trace!(
            policy = "LFU",
            frequency = self.min_frequency,
            resident = self.map.len(),
            "evicted least frequently used entry"
        );
    }

    /// Returns `true` if `key` is resident. Does not count as an access.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Access count of a resident key: 1 after insertion, plus one per hit.
    pub fn frequency(&self, key: &K) -> Option<usize> {
        self.map.get(key).map(|entry| entry.frequency)
    }

    /// Resident keys with the given access count, oldest first.
    pub fn keys_with_frequency(&self, frequency: usize) -> impl Iterator<Item = &K> + '_ {
        self.buckets.get(&frequency).into_iter().flat_map(List::iter)
    }
}

impl<K, S: BackingStore<K>> LfuCache<K, S> {
    /// Lowest access count among resident entries, `None` when empty.
    pub fn min_frequency(&self) -> Option<usize> {
        (!self.map.is_empty()).then_some(self.min_frequency)
    }

    /// Maximum number of resident entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Current number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Cumulative number of hits.
    #[inline]
    pub fn hit_count(&self) -> u64 {
        self.base.hit_count()
    }

    /// Whether the most recent lookup was a hit.
    #[inline]
    pub fn hit_flag(&self) -> bool {
        self.base.hit_flag()
    }

    /// Cumulative number of lookups that consulted the backing store.
    #[inline]
    pub fn miss_count(&self) -> u64 {
        self.base.miss_count()
    }

    /// Number of entries evicted so far.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.base.eviction_count()
    }

    /// Cumulative number of backing store consultations.
    #[inline]
    pub fn backing_request_count(&self) -> u64 {
        self.base.store().request_count()
    }

    /// Shared counters.
    #[inline]
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        self.base.metrics()
    }

    /// Frequency figures reported next to the shared counters.
    #[inline]
    pub fn lfu_metrics(&self) -> &LfuCacheMetrics {
        &self.lfu_metrics
    }

    /// Borrows the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        self.base.store()
    }

    /// Consumes the cache and returns the backing store.
    pub fn into_store(self) -> S {
        self.base.into_store()
    }
}

impl<K, S> CachePolicy<K> for LfuCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    type Value = S::Value;
    type Error = S::Error;

    fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        LfuCache::lookup(self, key)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn hit_count(&self) -> u64 {
        LfuCache::hit_count(self)
    }

    fn hit_flag(&self) -> bool {
        LfuCache::hit_flag(self)
    }

    fn backing_request_count(&self) -> u64 {
        LfuCache::backing_request_count(self)
    }

    fn core_metrics(&self) -> &CoreCacheMetrics {
        LfuCache::core_metrics(self)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }
}

impl<K, S: BackingStore<K>> CacheMetrics for LfuCache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let core = self.base.metrics();
        let mut metrics = core.to_btreemap();
        self.lfu_metrics.extend_report(&mut metrics);
        metrics.insert(
            "backing_requests".to_string(),
            self.backing_request_count() as f64,
        );
        metrics.insert("resident".to_string(), self.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        PolicyKind::Lfu.name()
    }
}

impl<K, S: BackingStore<K>> fmt::Debug for LfuCache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency())
            .field("hits", &self.base.hit_count())
            .finish()
    }
}
