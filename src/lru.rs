//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides an LRU cache in front of a [`BackingStore`], with O(1)
//! work per lookup. LRU is one of the most widely used eviction algorithms due
//! to its simplicity and good performance for workloads with temporal locality.
//!
//! # Algorithm
//!
//! The cache keeps resident entries ordered by recency of use. A hit moves the
//! entry to the most-recent end; a miss fetches from the backing store and
//! inserts at the most-recent end. When the resident count then exceeds the
//! capacity, the entry at the least-recent end is evicted. Entries that were
//! never touched after insertion leave in insertion order.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Hit: O(1)
//!   - Miss: O(1) plus one backing store lookup
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!
//! # When to Use
//!
//! LRU caches are ideal for:
//! - General-purpose caching where access patterns exhibit temporal locality
//!
//! They are less suitable for:
//! - Scanning patterns where a large set of items is accessed once in sequence
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, serialize all
//! lookups on one instance behind a single `Mutex`.

extern crate alloc;

use crate::base::CacheBase;
use crate::config::{CacheConfig, PREALLOCATION_LIMIT};
use crate::list::{List, NodeId};
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
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

/// An implementation of a Least Recently Used (LRU) cache.
///
/// # Examples
///
/// ```
/// use policy_cache::LruCache;
/// use policy_cache::store::Memory;
///
/// let memory = Memory::new(vec!["a", "b", "c"]);
/// let mut cache = LruCache::new(2, memory);
///
/// cache.lookup(&0).unwrap();
/// cache.lookup(&1).unwrap();
/// cache.lookup(&0).unwrap(); // hit: 0 becomes most recently used
/// cache.lookup(&2).unwrap(); // miss: 1 is evicted
///
/// assert!(cache.contains(&0));
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.hit_count(), 1);
/// assert_eq!(cache.backing_request_count(), 3);
/// ```
pub struct LruCache<K, S: BackingStore<K>> {
    base: CacheBase<S>,
    config: CacheConfig,
    /// Front is most recently used.
    list: List<(K, S::Value)>,
    map: HashMap<K, NodeId>,
}

impl<K, S> LruCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    pub fn new(capacity: usize, store: S) -> Self {
        Self::init(CacheConfig::new(capacity), store)
    }

    /// Creates an LRU cache from a configuration.
    pub fn init(config: CacheConfig, store: S) -> Self {
        let capacity = config.capacity;
        tracing::debug!(policy = "LRU", capacity, "created cache");
        LruCache {
            base: CacheBase::new(store, capacity),
            config,
            list: List::with_capacity(capacity.min(PREALLOCATION_LIMIT)),
            map: HashMap::with_capacity(capacity.min(PREALLOCATION_LIMIT)),
        }
    }

    /// Looks up `key`, consulting the backing store only on a miss.
    ///
    /// # Errors
    ///
    /// Returns the backing store's error unchanged. A failed fetch leaves the
    /// resident set untouched.
    pub fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        if let Some(&node) = self.map.get(key) {
            self.list.move_to_front(node);
            if let Some((_, value)) = self.list.get(node) {
                let value = value.clone();
                self.base.record_hit();
                return Ok(value);
            }
        }

        let value = self.base.fetch(key)?;
        if self.config.capacity == 0 {
            return Ok(value);
        }

        let node = self.list.push_front((key.clone(), value.clone()));
        self.map.insert(key.clone(), node);
        self.base.record_insertion();

        if self.map.len() > self.config.capacity {
            self.evict_least_recent();
        }
        Ok(value)
    }

    fn evict_least_recent(&mut self) {
        if let Some((old_key, _)) = self.list.remove_last() {
            self.map.remove(&old_key);
            self.base.record_eviction();
            tracing::trace!(
                policy = "LRU",
                resident = self.map.len(),
                "evicted least recently used entry"
            );
        }
    }

    /// Returns a reference to the cached value without updating recency.
    pub fn peek(&self, key: &K) -> Option<&S::Value> {
        let node = self.map.get(key)?;
        self.list.get(*node).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is resident. Does not update recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Resident keys, most recently used first.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(key, _)| key)
    }
}

impl<K, S: BackingStore<K>> LruCache<K, S> {
    /// Maximum number of resident entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Current number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
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

impl<K, S> CachePolicy<K> for LruCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    type Value = S::Value;
    type Error = S::Error;

    fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        LruCache::lookup(self, key)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn hit_count(&self) -> u64 {
        LruCache::hit_count(self)
    }

    fn hit_flag(&self) -> bool {
        LruCache::hit_flag(self)
    }

    fn backing_request_count(&self) -> u64 {
        LruCache::backing_request_count(self)
    }

    fn core_metrics(&self) -> &CoreCacheMetrics {
        LruCache::core_metrics(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }
}

impl<K, S: BackingStore<K>> CacheMetrics for LruCache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.base.metrics().to_btreemap();
        metrics.insert(
            "backing_requests".to_string(),
            self.backing_request_count() as f64,
        );
        metrics.insert("resident".to_string(), self.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        PolicyKind::Lru.name()
    }
}

impl<K, S: BackingStore<K>> fmt::Debug for LruCache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .field("hits", &self.base.hit_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{FnStore, Memory};
    use alloc::vec;
    use alloc::vec::Vec;

    fn memory(len: usize) -> Memory<usize> {
        Memory::new((0..len).map(|i| i * 10).collect())
    }

    fn recency<K: Hash + Eq + Clone, S: BackingStore<K>>(cache: &LruCache<K, S>) -> Vec<K>
    where
        S::Value: Clone,
    {
        cache.keys_by_recency().cloned().collect()
    }

    #[test]
    fn test_lru_hit_and_miss() {
        let mut cache = LruCache::new(2, memory(10));
        assert_eq!(cache.lookup(&3), Ok(30));
        assert!(!cache.hit_flag());
        assert_eq!(cache.lookup(&3), Ok(30));
        assert!(cache.hit_flag());
        assert_eq!(cache.hit_count(), 1);
        assert_eq!(cache.backing_request_count(), 1);
        assert_eq!(cache.miss_count(), 1);
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = LruCache::new(2, memory(10));
        cache.lookup(&0).unwrap();
        cache.lookup(&1).unwrap();
        cache.lookup(&0).unwrap();
        cache.lookup(&2).unwrap();

        assert!(cache.contains(&0));
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.eviction_count(), 1);
        assert_eq!(recency(&cache), vec![2, 0]);
    }

    #[test]
    fn test_lru_untouched_entries_leave_in_insertion_order() {
        let mut cache = LruCache::new(3, memory(10));
        for key in 0..3 {
            cache.lookup(&key).unwrap();
        }
        cache.lookup(&3).unwrap();
        assert!(!cache.contains(&0));
        cache.lookup(&4).unwrap();
        assert!(!cache.contains(&1));
        assert_eq!(recency(&cache), vec![4, 3, 2]);
    }

    #[test]
    fn test_lru_zero_capacity_retains_nothing() {
        let mut cache = LruCache::new(0, memory(4));
        assert_eq!(cache.lookup(&1), Ok(10));
        assert_eq!(cache.lookup(&1), Ok(10));
        assert!(cache.is_empty());
        assert!(!cache.hit_flag());
        assert_eq!(cache.hit_count(), 0);
        assert_eq!(cache.backing_request_count(), 2);
        assert_eq!(cache.eviction_count(), 0);
    }

    #[test]
    fn test_lru_store_error_leaves_state_untouched() {
        let mut cache = LruCache::new(2, memory(2));
        cache.lookup(&0).unwrap();
        cache.lookup(&1).unwrap();
        assert_eq!(
            cache.lookup(&7),
            Err(StoreError::AddressOutOfRange { address: 7, len: 2 })
        );
        assert_eq!(cache.len(), 2);
        assert_eq!(recency(&cache), vec![1, 0]);
        assert_eq!(cache.eviction_count(), 0);
        assert!(!cache.hit_flag());
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2, memory(10));
        cache.lookup(&0).unwrap();
        cache.lookup(&1).unwrap();
        assert_eq!(cache.peek(&0), Some(&0));
        cache.lookup(&2).unwrap();
        assert!(!cache.contains(&0));
        assert_eq!(cache.peek(&0), None);
    }

    #[test]
    fn test_lru_string_keys() {
        let store = FnStore::new(|key: &String| Ok::<_, ()>(key.len()));
        let mut cache = LruCache::new(2, store);
        assert_eq!(cache.lookup(&String::from("apple")), Ok(5));
        assert_eq!(cache.lookup(&String::from("banana")), Ok(6));
        assert_eq!(cache.lookup(&String::from("apple")), Ok(5));
        assert_eq!(cache.hit_count(), 1);
        assert_eq!(cache.store().request_count(), 2);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2, memory(10));
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests"), Some(&0.0));
        assert_eq!(metrics.get("cache_hits"), Some(&0.0));

        cache.lookup(&0).unwrap();
        cache.lookup(&1).unwrap();
        cache.lookup(&0).unwrap();
        cache.lookup(&2).unwrap();

        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests"), Some(&4.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&3.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("backing_requests"), Some(&3.0));
        assert_eq!(metrics.get("resident"), Some(&2.0));
        assert_eq!(cache.algorithm_name(), "LRU");
    }
}
