#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Algorithm Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                Which Replacement Policy Should I Use?                │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  Recent keys are likely to be reused?  ──Yes──▶  LRU                 │
//! │            │                                                         │
//! │           No                                                         │
//! │            ▼                                                         │
//! │  Loops larger than the cache?          ──Yes──▶  MRU                 │
//! │            │                                                         │
//! │           No                                                         │
//! │            ▼                                                         │
//! │  A stable set of popular keys?         ──Yes──▶  LFU                 │
//! │            │                                                         │
//! │           No                                                         │
//! │            ▼                                                         │
//! │  Tiny cache, simplest possible?        ──Yes──▶  Cyclic              │
//! │                                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Policy | Evicts | Hit | Miss |
//! |--------|--------|-----|------|
//! | [`CyclicCache`] | The slot under the write cursor | O(n) | O(n) |
//! | [`LruCache`] | Least recently used entry | O(1) | O(1) |
//! | [`MruCache`] | Most recently used entry, before insertion | O(1) | O(1) |
//! | [`LfuCache`] | Lowest access count, oldest first | O(log F) | O(log F) |
//!
//! Every cache fronts a [`BackingStore`](store::BackingStore) and consults it
//! exactly once per miss. Store errors are returned to the caller unchanged.
//!
//! ## Choosing a Policy at Runtime
//!
//! ```rust
//! use policy_cache::{Cache, CachePolicy, PolicyKind};
//! use policy_cache::store::Memory;
//!
//! let memory = Memory::new((0..100u64).collect());
//! let mut cache = Cache::new(PolicyKind::Lfu, 5, memory);
//!
//! for address in [1, 2, 1, 3, 1] {
//!     cache.lookup(&address).unwrap();
//! }
//! assert_eq!(cache.hit_count(), 2);
//! assert_eq!(cache.backing_request_count(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`store`]: The backing store contract and the bundled stores
//! - [`base`]: Counters shared by every policy
//! - [`cyclic`]: Round-robin cache
//! - [`lru`]: Least Recently Used cache
//! - [`mru`]: Most Recently Used cache
//! - [`lfu`]: Least Frequently Used cache
//! - [`policy`]: The shared contract and runtime policy selection
//! - [`config`]: Capacity configuration
//! - [`metrics`]: Metrics reporting for all policies

#![no_std]
#![warn(missing_docs)]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Arena-backed doubly linked list used for recency and frequency ordering.
///
/// Internal infrastructure; nodes link by index, not by pointer.
pub(crate) mod list;

/// Backing store contract.
///
/// Provides the `BackingStore` trait every cache fronts, plus `Memory` and
/// `FnStore`.
pub mod store;

/// Shared cache bookkeeping.
pub mod base;

/// Capacity configuration for all policies.
pub mod config;

/// Error types.
pub mod error;

/// Round-robin cache implementation.
///
/// Overwrites slots in strict insertion order, ignoring recency and frequency.
pub mod cyclic;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// the capacity is exceeded.
pub mod lru;

/// Most Recently Used (MRU) cache implementation.
pub mod mru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Evicts the entry with the smallest access count; ties go to the entry that
/// has held that count the longest.
pub mod lfu;

/// The shared policy contract and the runtime-selected [`Cache`].
pub mod policy;

/// Cache metrics system.
///
/// Provides a metrics reporting interface implemented by every policy, with
/// LFU adding frequency-level figures.
pub mod metrics;

// Re-export cache types
pub use cyclic::CyclicCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use mru::MruCache;

pub use base::CacheBase;
pub use config::CacheConfig;
pub use error::{ConfigError, ParsePolicyError, StoreError};
pub use metrics::CacheMetrics;
pub use policy::{Cache, CachePolicy, PolicyKind};
pub use store::{BackingStore, FnStore, Memory};
