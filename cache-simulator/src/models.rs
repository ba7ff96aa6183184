// Data models for cache simulation

use policy_cache::PolicyKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Shape of a generated address trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AccessPattern {
    /// Every address equally likely
    Uniform,
    /// Repeated sequential scan over all addresses
    Loop,
    /// 80% of requests go to 20% of the addresses
    Hotset,
}

impl AccessPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPattern::Uniform => "uniform",
            AccessPattern::Loop => "loop",
            AccessPattern::Hotset => "hotset",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Cache capacity in number of entries
    pub capacity: usize,
    /// Policies to simulate
    pub policies: Vec<PolicyKind>,
    /// Number of words in the simulated memory
    pub addresses: usize,
}

/// Results of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    /// Statistics for each policy
    pub stats: BTreeMap<PolicyKind, PolicyStats>,
    /// Total number of lookups replayed per policy
    pub total_requests: usize,
    /// Number of distinct addresses in the trace
    pub unique_addresses: usize,
    /// Wall time of the whole run
    pub duration: Duration,
    /// Cache capacity used
    pub capacity: usize,
}

/// Statistics for a single policy
#[derive(Debug, Default, Clone)]
pub struct PolicyStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of resident entries displaced
    pub evictions: u64,
    /// Number of times the backing memory was consulted
    pub backing_requests: u64,
    /// Resident entries at the end of the run
    pub resident: usize,
    /// Time spent replaying the trace
    pub duration: Duration,
    /// Full metrics report from the cache
    pub metrics: BTreeMap<String, f64>,
}

impl PolicyStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Lookups per second over the replay
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.hits + self.misses) as f64 / secs
        } else {
            0.0
        }
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub capacity: usize,
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    pub backing_requests: u64,
    pub resident: usize,
    pub duration_ns: u64,
    pub ops_per_sec: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_is_a_percentage() {
        let stats = PolicyStats {
            hits: 1,
            misses: 3,
            ..PolicyStats::new()
        };
        assert!((stats.hit_rate() - 25.0).abs() < f64::EPSILON);
        assert_eq!(PolicyStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(AccessPattern::Hotset.to_string(), "hotset");
        assert_eq!(AccessPattern::Loop.as_str(), "loop");
    }
}
