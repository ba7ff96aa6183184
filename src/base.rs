//! Cache Base
//!
//! Bookkeeping shared by every replacement policy: the hit counter, the
//! "last call was a hit" flag, and the handle to the backing store that is
//! consulted on a miss. Each policy composes a [`CacheBase`] instead of
//! re-implementing these counters.
//!
//! The counters are only ever updated from inside a policy's `lookup`; the
//! base exposes them read-only.

use crate::metrics::CoreCacheMetrics;
use crate::store::BackingStore;

/// Counters and store handle composed into every policy.
///
/// On its own the base does no caching at all: [`CacheBase::lookup`] passes
/// every request straight to the backing store.
///
/// # Examples
///
/// ```
/// use policy_cache::base::CacheBase;
/// use policy_cache::store::Memory;
///
/// let mut base = CacheBase::new(Memory::new(vec![7, 8, 9]), 0);
/// assert_eq!(base.lookup(&2), Ok(9));
/// assert_eq!(base.lookup(&2), Ok(9));
/// assert_eq!(base.hit_count(), 0);
/// assert_eq!(base.backing_request_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CacheBase<S> {
    store: S,
    hit_flag: bool,
    metrics: CoreCacheMetrics,
}

impl<S> CacheBase<S> {
    /// Creates the shared state for a cache of `capacity` entries over `store`.
    pub fn new(store: S, capacity: usize) -> Self {
        Self {
            store,
            hit_flag: false,
            metrics: CoreCacheMetrics::new(capacity),
        }
    }

    /// Cumulative number of lookups answered without the backing store.
    #[inline]
    pub fn hit_count(&self) -> u64 {
        self.metrics.cache_hits
    }

    /// Whether the most recent lookup was a hit.
    #[inline]
    pub fn hit_flag(&self) -> bool {
        self.hit_flag
    }

    /// Cumulative number of lookups that had to consult the backing store.
    #[inline]
    pub fn miss_count(&self) -> u64 {
        self.metrics.cache_misses()
    }

    /// Number of entries evicted so far.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.metrics.evictions
    }

    /// Shared metrics.
    #[inline]
    pub fn metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }

    /// Borrows the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the base and returns the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hit_flag = true;
        self.metrics.record_hit();
    }

    #[inline]
    pub(crate) fn record_insertion(&mut self) {
        self.metrics.record_insertion();
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.metrics.record_eviction();
    }
}

impl<S> CacheBase<S> {
    /// Total number of backing store consultations, as counted by the store.
    #[inline]
    pub fn backing_request_count<K: ?Sized>(&self) -> u64
    where
        S: BackingStore<K>,
    {
        self.store.request_count()
    }

    /// Resolves `key` from the backing store and counts the lookup as a miss.
    ///
    /// The hit flag is cleared before the store is consulted so that a failed
    /// fetch never leaves a stale `true` behind. Store errors are returned
    /// unchanged.
    pub(crate) fn fetch<K: ?Sized>(&mut self, key: &K) -> Result<S::Value, S::Error>
    where
        S: BackingStore<K>,
    {
        self.hit_flag = false;
        self.metrics.record_miss();
        self.store.lookup(key)
    }

    /// Pass-through lookup: always consults the backing store, never caches.
    ///
    /// Policies call [`fetch`](Self::fetch) on a miss instead; this exists for
    /// callers that want an uncached baseline with the same counters.
    pub fn lookup<K: ?Sized>(&mut self, key: &K) -> Result<S::Value, S::Error>
    where
        S: BackingStore<K>,
    {
        self.fetch(key)
    }
}
