//! Backing Store Contract
//!
//! A cache in this crate always sits in front of a slower source of truth,
//! the *backing store*. The store is consulted only on a miss, and it keeps
//! its own count of how many times it was asked. Caches observe that counter
//! but never mutate it.
//!
//! The contract is deliberately small:
//!
//! - `lookup(key)` resolves a key or fails. Resolution is deterministic: the
//!   same key always yields the same value.
//! - `request_count()` reports how many lookups were made, successful or not.
//!
//! Two stores are bundled:
//!
//! - [`Memory`]: a word-addressed vector. Address `n` resolves to the `n`th
//!   word; addresses past the end fail with [`StoreError::AddressOutOfRange`].
//! - [`FnStore`]: wraps a closure, for keys that are not plain addresses.

extern crate alloc;

use crate::error::StoreError;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

/// The slow, authoritative source a cache fronts.
pub trait BackingStore<K: ?Sized> {
    /// Value produced for a key.
    type Value;

    /// Failure to resolve a key. Caches propagate it unchanged.
    type Error;

    /// Resolves `key`. Every call, successful or not, counts as a request.
    fn lookup(&mut self, key: &K) -> Result<Self::Value, Self::Error>;

    /// Total number of calls to [`lookup`](Self::lookup) so far.
    fn request_count(&self) -> u64;
}

/// Word-addressed memory with request counting.
///
/// # Examples
///
/// ```
/// use policy_cache::store::{BackingStore, Memory};
///
/// let mut memory = Memory::new(vec![10, 20, 30]);
/// assert_eq!(memory.lookup(&1), Ok(20));
/// assert!(memory.lookup(&3).is_err());
/// assert_eq!(memory.request_count(), 2);
/// ```
#[derive(Clone)]
pub struct Memory<V> {
    data: Vec<V>,
    requests: u64,
}

impl<V> Memory<V> {
    /// Creates a memory holding `data`, addressed from zero.
    pub fn new(data: Vec<V>) -> Self {
        Self {
            data,
            requests: 0,
        }
    }

    /// Number of addressable words.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no address resolves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<V: Clone> BackingStore<usize> for Memory<V> {
    type Value = V;
    type Error = StoreError;

    fn lookup(&mut self, address: &usize) -> Result<V, StoreError> {
        self.requests += 1;
        self.data
            .get(*address)
            .cloned()
            .ok_or(StoreError::AddressOutOfRange {
                address: *address,
                len: self.data.len(),
            })
    }

    #[inline]
    fn request_count(&self) -> u64 {
        self.requests
    }
}

impl<V> fmt::Debug for Memory<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.data.len())
            .field("requests", &self.requests)
            .finish()
    }
}

/// A backing store that resolves keys with a closure.
///
/// The closure must be deterministic per key; the cache relies on a re-fetch
/// after eviction producing the same value.
///
/// # Examples
///
/// ```
/// use policy_cache::store::{BackingStore, FnStore};
///
/// let mut store = FnStore::new(|key: &String| Ok::<_, ()>(key.len()));
/// assert_eq!(store.lookup(&String::from("apple")), Ok(5));
/// assert_eq!(store.request_count(), 1);
/// ```
pub struct FnStore<K: ?Sized, V, E, F> {
    resolve: F,
    requests: u64,
    _marker: PhantomData<fn(&K) -> Result<V, E>>,
}

impl<K: ?Sized, V, E, F> FnStore<K, V, E, F>
where
    F: FnMut(&K) -> Result<V, E>,
{
    /// Wraps `resolve` as a counting backing store.
    pub fn new(resolve: F) -> Self {
        Self {
            resolve,
            requests: 0,
            _marker: PhantomData,
        }
    }
}

impl<K: ?Sized, V, E, F> BackingStore<K> for FnStore<K, V, E, F>
where
    F: FnMut(&K) -> Result<V, E>,
{
    type Value = V;
    type Error = E;

    fn lookup(&mut self, key: &K) -> Result<V, E> {
        self.requests += 1;
        (self.resolve)(key)
    }

    #[inline]
    fn request_count(&self) -> u64 {
        self.requests
    }
}

impl<K: ?Sized, V, E, F> fmt::Debug for FnStore<K, V, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStore")
            .field("requests", &self.requests)
            .finish()
    }
}
