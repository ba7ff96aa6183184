//! Cache Configuration Module
//!
//! Every replacement policy in this crate is configured the same way: by the
//! number of entries it may keep resident. There is no other knob.
//!
//! # Design Philosophy
//!
//! The configuration struct has a public field for simple instantiation:
//!
//! - **Simple**: Just create the struct with the field set
//! - **Validated at the edge**: Capacities that arrive as signed integers
//!   (CLI flags, config files) go through [`CacheConfig::from_signed`] or
//!   `TryFrom<i64>`, so a negative capacity is rejected before any cache
//!   exists rather than discovered on first use
//!
//! # Capacity Zero
//!
//! A capacity of `0` is valid. Such a cache retains nothing: every lookup is a
//! miss that consults the backing store.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::CacheConfig;
//!
//! let config = CacheConfig { capacity: 100 };
//! assert_eq!(config.capacity, 100);
//!
//! // The default matches the conventional five-entry cache
//! assert_eq!(CacheConfig::default().capacity, 5);
//!
//! // Signed input is validated
//! assert!(CacheConfig::from_signed(-1).is_err());
//! ```

use crate::error::ConfigError;
use core::fmt;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 5;

/// Upper bound on the entries a cache reserves room for up front. Larger
/// caches grow on demand.
pub(crate) const PREALLOCATION_LIMIT: usize = 1024;

/// Configuration shared by the Cyclic, LRU, MRU and LFU caches.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries resident at once. May be zero.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity.
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration from a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCapacity`] when `capacity < 0`, and
    /// [`ConfigError::CapacityOverflow`] when it does not fit in `usize`.
    pub fn from_signed(capacity: i64) -> Result<Self, ConfigError> {
        if capacity < 0 {
            return Err(ConfigError::NegativeCapacity(capacity));
        }
        let capacity =
            usize::try_from(capacity).map_err(|_| ConfigError::CapacityOverflow(capacity))?;
        Ok(Self { capacity })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TryFrom<i64> for CacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        Self::from_signed(capacity)
    }
}

impl From<usize> for CacheConfig {
    fn from(capacity: usize) -> Self {
        Self::new(capacity)
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = CacheConfig { capacity: 1000 };
        assert_eq!(config.capacity, 1000);
        assert_eq!(CacheConfig::new(7), CacheConfig::from(7usize));
    }

    #[test]
    fn test_config_default_capacity() {
        assert_eq!(CacheConfig::default().capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_config_rejects_negative_capacity() {
        assert_eq!(
            CacheConfig::from_signed(-1),
            Err(ConfigError::NegativeCapacity(-1))
        );
        assert_eq!(
            CacheConfig::try_from(i64::MIN),
            Err(ConfigError::NegativeCapacity(i64::MIN))
        );
    }

    #[test]
    fn test_config_accepts_zero_capacity() {
        assert_eq!(CacheConfig::from_signed(0), Ok(CacheConfig { capacity: 0 }));
        assert_eq!(CacheConfig::try_from(3i64).map(|c| c.capacity), Ok(3));
    }
}
