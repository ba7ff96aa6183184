//! Cyclic (round-robin) Cache Implementation
//!
//! The simplest replacement policy: a fixed array of slots and a write cursor.
//! Misses are written at the cursor, which then advances modulo the capacity,
//! so slots are overwritten in strict round-robin order regardless of how
//! often or how recently their contents were used.
//!
//! # Algorithm
//!
//! - Lookup scans every slot for the key. A match is a hit; slots are never
//!   reordered.
//! - A miss fetches from the backing store, writes `(key, value)` at the
//!   cursor (overwriting any occupant, hot or not) and advances the cursor.
//!
//! # Performance Characteristics
//!
//! - Hit and miss: O(n) scan where n is the capacity
//! - Space: exactly n slots, allocated up front
//!
//! The linear scan makes this policy a baseline for small caches rather than
//! a general-purpose choice.

extern crate alloc;

use crate::base::CacheBase;
use crate::config::CacheConfig;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::policy::{CachePolicy, PolicyKind};
use crate::store::BackingStore;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A round-robin cache over a fixed array of slots.
///
/// # Examples
///
/// ```
/// use policy_cache::CyclicCache;
/// use policy_cache::store::Memory;
///
/// let mut cache = CyclicCache::new(3, Memory::new(vec![0, 10, 20, 30]));
/// for address in 0..4 {
///     cache.lookup(&address).unwrap();
/// }
///
/// // Address 3 overwrote address 0's slot.
/// assert!(!cache.contains(&0));
/// assert_eq!(cache.cursor(), 1);
/// ```
pub struct CyclicCache<K, S: BackingStore<K>> {
    base: CacheBase<S>,
    slots: Vec<Option<(K, S::Value)>>,
    cursor: usize,
}

impl<K, S> CyclicCache<K, S>
where
    K: Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    /// Creates a cyclic cache with `capacity` empty slots.
    pub fn new(capacity: usize, store: S) -> Self {
        Self::init(CacheConfig::new(capacity), store)
    }

    /// Creates a cyclic cache from a configuration.
    pub fn init(config: CacheConfig, store: S) -> Self {
        let capacity = config.capacity;
        tracing::debug!(policy = "Cyclic", capacity, "created cache");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        CyclicCache {
            base: CacheBase::new(store, capacity),
            slots,
            cursor: 0,
        }
    }

    /// Looks up `key`, consulting the backing store only on a miss.
    ///
    /// # Errors
    ///
    /// Returns the backing store's error unchanged; the cursor does not move
    /// and no slot is written.
    pub fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        if let Some(value) = self.find(key) {
            let value = value.clone();
            self.base.record_hit();
            return Ok(value);
        }

        let value = self.base.fetch(key)?;
        let capacity = self.slots.len();
        if capacity == 0 {
            return Ok(value);
        }

        let slot = &mut self.slots[self.cursor];
        if slot.is_some() {
            self.base.record_eviction();
            tracing::trace!(policy = "Cyclic", slot = self.cursor, "overwrote occupied slot");
        }
        *slot = Some((key.clone(), value.clone()));
        self.base.record_insertion();
        self.cursor = (self.cursor + 1) % capacity;
        Ok(value)
    }

    fn find(&self, key: &K) -> Option<&S::Value> {
        self.slots
            .iter()
            .flatten()
            .find(|(resident, _)| resident == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` occupies a slot.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K, S: BackingStore<K>> CyclicCache<K, S> {
    /// Index of the slot the next miss will be written to.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The slot array, in index order. Empty slots are `None`.
    #[inline]
    pub fn slots(&self) -> &[Option<(K, S::Value)>] {
        &self.slots
    }

    /// Maximum number of resident entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
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

    /// Number of occupied slots that were overwritten.
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

impl<K, S> CachePolicy<K> for CyclicCache<K, S>
where
    K: Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    type Value = S::Value;
    type Error = S::Error;

    fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        CyclicCache::lookup(self, key)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Cyclic
    }

    fn hit_count(&self) -> u64 {
        CyclicCache::hit_count(self)
    }

    fn hit_flag(&self) -> bool {
        CyclicCache::hit_flag(self)
    }

    fn backing_request_count(&self) -> u64 {
        CyclicCache::backing_request_count(self)
    }

    fn core_metrics(&self) -> &CoreCacheMetrics {
        CyclicCache::core_metrics(self)
    }

    fn len(&self) -> usize {
        CyclicCache::len(self)
    }

    fn capacity(&self) -> usize {
        CyclicCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        CyclicCache::contains(self, key)
    }
}

impl<K, S: BackingStore<K>> CacheMetrics for CyclicCache<K, S> {
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
        PolicyKind::Cyclic.name()
    }
}

impl<K, S: BackingStore<K>> fmt::Debug for CyclicCache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CyclicCache")
            .field("capacity", &self.slots.len())
            .field("cursor", &self.cursor)
            .field("hits", &self.base.hit_count())
            .finish()
    }
}
