//! Most Recently Used (MRU) Cache Implementation
//!
//! MRU keeps the same recency order as LRU but evicts from the opposite end:
//! when the cache is full, the entry used most recently is the one that goes.
//! This suits cyclic scans larger than the cache, where the entry just used is
//! the one needed furthest in the future.
//!
//! # Algorithm
//!
//! - Hit: move the entry to the most-recent end.
//! - Miss: fetch from the backing store. If the cache is already full, evict
//!   the most-recent entry first, then insert the new entry at the most-recent
//!   end.
//!
//! Eviction happens *before* insertion, so the entry just fetched is never its
//! own victim.
//!
//! # Performance Characteristics
//!
//! - Hit: O(1)
//! - Miss: O(1) plus one backing store lookup

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

/// An implementation of a Most Recently Used (MRU) cache.
///
/// # Examples
///
/// ```
/// use policy_cache::MruCache;
/// use policy_cache::store::Memory;
///
/// let mut cache = MruCache::new(2, Memory::new(vec!['a', 'b', 'c']));
///
/// cache.lookup(&0).unwrap();
/// cache.lookup(&1).unwrap();
/// cache.lookup(&1).unwrap(); // hit: 1 is most recent
/// cache.lookup(&2).unwrap(); // full: 1 is evicted before 2 goes in
///
/// assert!(cache.contains(&0));
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub struct MruCache<K, S: BackingStore<K>> {
    base: CacheBase<S>,
    config: CacheConfig,
    /// Front is most recently used.
    list: List<(K, S::Value)>,
    map: HashMap<K, NodeId>,
}

impl<K, S> MruCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    /// Creates an MRU cache holding at most `capacity` entries.
    pub fn new(capacity: usize, store: S) -> Self {
        Self::init(CacheConfig::new(capacity), store)
    }

    /// Creates an MRU cache from a configuration.
    pub fn init(config: CacheConfig, store: S) -> Self {
        let capacity = config.capacity;
        tracing::debug!(policy = "MRU", capacity, "created cache");
        MruCache {
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
    /// Returns the backing store's error unchanged. Nothing is evicted when
    /// the fetch fails.
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

        if self.map.len() >= self.config.capacity {
            self.evict_most_recent();
        }

        let node = self.list.push_front((key.clone(), value.clone()));
        self.map.insert(key.clone(), node);
        self.base.record_insertion();
        Ok(value)
    }

    fn evict_most_recent(&mut self) {
        if let Some((old_key, _)) = self.list.remove_first() {
            self.map.remove(&old_key);
            self.base.record_eviction();
            tracing::trace!(
                policy = "MRU",
                resident = self.map.len(),
                "evicted most recently used entry"
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

impl<K, S: BackingStore<K>> MruCache<K, S> {
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

impl<K, S> CachePolicy<K> for MruCache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    type Value = S::Value;
    type Error = S::Error;

    fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        MruCache::lookup(self, key)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
    }

    fn hit_count(&self) -> u64 {
        MruCache::hit_count(self)
    }

    fn hit_flag(&self) -> bool {
        MruCache::hit_flag(self)
    }

    fn backing_request_count(&self) -> u64 {
        MruCache::backing_request_count(self)
    }

    fn core_metrics(&self) -> &CoreCacheMetrics {
        MruCache::core_metrics(self)
    }

    fn len(&self) -> usize {
        MruCache::len(self)
    }

    fn capacity(&self) -> usize {
        MruCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        MruCache::contains(self, key)
    }
}

impl<K, S: BackingStore<K>> CacheMetrics for MruCache<K, S> {
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
        PolicyKind::Mru.name()
    }
}

impl<K, S: BackingStore<K>> fmt::Debug for MruCache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .field("hits", &self.base.hit_count())
            .finish()
    }
}
