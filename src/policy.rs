//! Policy selection and the shared lookup contract.
//!
//! Every replacement policy answers the same questions: resolve a key, report
//! how many lookups were hits, say whether the last lookup was one, and report
//! how often the backing store was consulted. [`CachePolicy`] captures that
//! contract for generic code, and [`Cache`] is the closed set of policies for
//! callers that pick one at runtime.
//!
//! ```
//! use policy_cache::{Cache, CachePolicy, PolicyKind};
//! use policy_cache::store::Memory;
//!
//! let kind: PolicyKind = "lru".parse().unwrap();
//! let mut cache = Cache::build(kind, 2, Memory::new(vec![1, 2, 3])).unwrap();
//!
//! cache.lookup(&0).unwrap();
//! cache.lookup(&0).unwrap();
//! assert_eq!(cache.policy_name(), "LRU");
//! assert!(cache.hit_flag());
//! assert_eq!(cache.backing_request_count(), 1);
//! ```

extern crate alloc;

use crate::config::CacheConfig;
use crate::cyclic::CyclicCache;
use crate::error::{ConfigError, ParsePolicyError};
use crate::lfu::LfuCache;
use crate::lru::LruCache;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::mru::MruCache;
use crate::store::BackingStore;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;
use core::hash::Hash;
use core::str::FromStr;

/// The contract shared by every replacement policy.
pub trait CachePolicy<K> {
    /// Value type produced by the backing store.
    type Value;
    /// Error type produced by the backing store.
    type Error;

    /// Resolves `key`, from the resident set if possible and from the backing
    /// store otherwise.
    fn lookup(&mut self, key: &K) -> Result<Self::Value, Self::Error>;

    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Identifying name: `"Cyclic"`, `"LRU"`, `"MRU"` or `"LFU"`.
    fn policy_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Cumulative number of lookups satisfied without the backing store.
    fn hit_count(&self) -> u64;

    /// Whether the immediately preceding lookup was a hit.
    fn hit_flag(&self) -> bool;

    /// Cumulative number of backing store consultations.
    fn backing_request_count(&self) -> u64;

    /// Counters shared by every policy.
    fn core_metrics(&self) -> &CoreCacheMetrics;

    /// Cumulative number of lookups that consulted the backing store.
    fn miss_count(&self) -> u64 {
        self.core_metrics().cache_misses()
    }

    /// Number of resident entries displaced so far.
    fn eviction_count(&self) -> u64 {
        self.core_metrics().evictions
    }

    /// Current number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Whether `key` is resident. Never changes policy state.
    fn contains(&self, key: &K) -> bool;
}

/// The available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    /// Round-robin overwrite.
    Cyclic,
    /// Least recently used.
    Lru,
    /// Most recently used.
    Mru,
    /// Least frequently used.
    Lfu,
}

impl PolicyKind {
    /// Every policy, in presentation order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Cyclic,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Lfu,
    ];

    /// Identifying name of the policy.
    pub const fn name(self) -> &'static str {
        match self {
            PolicyKind::Cyclic => "Cyclic",
            PolicyKind::Lru => "LRU",
            PolicyKind::Mru => "MRU",
            PolicyKind::Lfu => "LFU",
        }
    }

    /// Every policy, in presentation order.
    pub fn all() -> &'static [PolicyKind] {
        &Self::ALL
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    /// Parses a policy name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParsePolicyError {
                name: name.to_string(),
            })
    }
}

/// A cache whose policy is chosen at runtime.
pub enum Cache<K, S: BackingStore<K>> {
    /// Round-robin overwrite.
    Cyclic(CyclicCache<K, S>),
    /// Least recently used.
    Lru(LruCache<K, S>),
    /// Most recently used.
    Mru(MruCache<K, S>),
    /// Least frequently used.
    Lfu(LfuCache<K, S>),
}

macro_rules! dispatch {
    ($self:expr, $cache:ident => $body:expr) => {
        match $self {
            Cache::Cyclic($cache) => $body,
            Cache::Lru($cache) => $body,
            Cache::Mru($cache) => $body,
            Cache::Lfu($cache) => $body,
        }
    };
}

impl<K, S> Cache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    /// Creates a cache of the given policy with `capacity` entries.
    pub fn new(kind: PolicyKind, capacity: usize, store: S) -> Self {
        Self::init(kind, CacheConfig::new(capacity), store)
    }

    /// Creates a cache of the given policy from a configuration.
    pub fn init(kind: PolicyKind, config: CacheConfig, store: S) -> Self {
        match kind {
            PolicyKind::Cyclic => Cache::Cyclic(CyclicCache::init(config, store)),
            PolicyKind::Lru => Cache::Lru(LruCache::init(config, store)),
            PolicyKind::Mru => Cache::Mru(MruCache::init(config, store)),
            PolicyKind::Lfu => Cache::Lfu(LfuCache::init(config, store)),
        }
    }

    /// Creates a cache from a signed capacity, rejecting negative values
    /// before anything is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is negative or too large.
    pub fn build(kind: PolicyKind, capacity: i64, store: S) -> Result<Self, ConfigError> {
        let config = CacheConfig::from_signed(capacity)?;
        Ok(Self::init(kind, config, store))
    }
}

impl<K, S: BackingStore<K>> Cache<K, S> {
    /// Borrows the backing store.
    pub fn store(&self) -> &S {
        dispatch!(self, cache => cache.store())
    }

    /// Consumes the cache and returns the backing store.
    pub fn into_store(self) -> S {
        dispatch!(self, cache => cache.into_store())
    }
}

impl<K, S> CachePolicy<K> for Cache<K, S>
where
    K: Hash + Eq + Clone,
    S: BackingStore<K>,
    S::Value: Clone,
{
    type Value = S::Value;
    type Error = S::Error;

    fn lookup(&mut self, key: &K) -> Result<S::Value, S::Error> {
        dispatch!(self, cache => cache.lookup(key))
    }

    fn kind(&self) -> PolicyKind {
        match self {
            Cache::Cyclic(_) => PolicyKind::Cyclic,
            Cache::Lru(_) => PolicyKind::Lru,
            Cache::Mru(_) => PolicyKind::Mru,
            Cache::Lfu(_) => PolicyKind::Lfu,
        }
    }

    fn hit_count(&self) -> u64 {
        dispatch!(self, cache => cache.hit_count())
    }

    fn hit_flag(&self) -> bool {
        dispatch!(self, cache => cache.hit_flag())
    }

    fn backing_request_count(&self) -> u64 {
        dispatch!(self, cache => cache.backing_request_count())
    }

    fn core_metrics(&self) -> &CoreCacheMetrics {
        dispatch!(self, cache => cache.core_metrics())
    }

    fn len(&self) -> usize {
        dispatch!(self, cache => cache.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, cache => cache.capacity())
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(self, cache => cache.contains(key))
    }
}

impl<K, S: BackingStore<K>> CacheMetrics for Cache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        dispatch!(self, cache => cache.metrics())
    }

    fn algorithm_name(&self) -> &'static str {
        dispatch!(self, cache => cache.algorithm_name())
    }
}

impl<K, S: BackingStore<K>> fmt::Debug for Cache<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, cache => fmt::Debug::fmt(cache, f))
    }
}
