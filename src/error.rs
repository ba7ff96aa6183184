//! Error types for cache construction and the bundled backing stores.
//!
//! Cache logic itself never fails: every failure a caller sees from
//! `lookup` is the backing store's own error, passed through unchanged.
//! The types here cover the remaining two cases, invalid configuration
//! (reported when a cache is built) and the stores shipped with this crate.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Rejected cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested capacity was below zero.
    #[error("cache capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),
    /// The requested capacity does not fit in `usize` on this target.
    #[error("cache capacity {0} exceeds the addressable range")]
    CapacityOverflow(i64),
}

/// A policy name that does not match any known replacement policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache policy `{name}` (expected one of: Cyclic, LRU, MRU, LFU)")]
pub struct ParsePolicyError {
    /// The rejected input.
    pub name: String,
}

/// Failure to resolve a key in one of the bundled backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The address is past the end of the store.
    #[error("address {address} is out of range for a store of {len} words")]
    AddressOutOfRange {
        /// Address that was requested.
        address: usize,
        /// Number of addressable words in the store.
        len: usize,
    },
}
