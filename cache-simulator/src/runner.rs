//! Simulation runner
//!
//! Replays one address trace through each configured policy. Every policy gets
//! a fresh memory and a fresh cache, so runs are independent and comparable.

use crate::models::{PolicyStats, SimulationConfig, SimulationResult};
use policy_cache::store::Memory;
use policy_cache::{Cache, CacheMetrics, CachePolicy, PolicyKind, StoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use thiserror::Error;

/// Failures while replaying a trace
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{policy}: lookup of address {address} failed: {source}")]
    Store {
        policy: PolicyKind,
        address: usize,
        #[source]
        source: StoreError,
    },
    #[error("{policy}: bookkeeping mismatch after {requests} requests: {detail}")]
    Inconsistent {
        policy: PolicyKind,
        requests: usize,
        detail: String,
    },
}

/// Runs a simulation for the configured policies
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    /// Create a new simulation runner
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the simulation over `trace`
    pub fn run(&self, trace: &[usize]) -> Result<SimulationResult, SimulationError> {
        let start = Instant::now();
        let unique_addresses = trace.iter().collect::<BTreeSet<_>>().len();

        let mut stats = BTreeMap::new();
        for &policy in &self.config.policies {
            tracing::info!(%policy, capacity = self.config.capacity, "simulating");
            let policy_stats = self.run_policy(policy, trace)?;
            tracing::info!(%policy, hit_rate = policy_stats.hit_rate(), "finished");
            stats.insert(policy, policy_stats);
        }

        Ok(SimulationResult {
            stats,
            total_requests: trace.len(),
            unique_addresses,
            duration: start.elapsed(),
            capacity: self.config.capacity,
        })
    }

    fn run_policy(&self, policy: PolicyKind, trace: &[usize]) -> Result<PolicyStats, SimulationError> {
        let memory = Memory::new((0..self.config.addresses as u64).collect());
        let mut cache = Cache::new(policy, self.config.capacity, memory);

        let inconsistent = |requests: usize, detail: String| SimulationError::Inconsistent {
            policy,
            requests,
            detail,
        };

        let start = Instant::now();
        for (index, &address) in trace.iter().enumerate() {
            let hits_before = cache.hit_count();
            cache
                .lookup(&address)
                .map_err(|source| SimulationError::Store {
                    policy,
                    address,
                    source,
                })?;
            let was_hit = cache.hit_count() == hits_before + 1;
            if cache.hit_flag() != was_hit {
                return Err(inconsistent(
                    index + 1,
                    format!(
                        "hit flag {} but hit counter moved by {}",
                        cache.hit_flag(),
                        cache.hit_count() - hits_before
                    ),
                ));
            }
        }
        let duration = start.elapsed();

        let misses = cache.miss_count();
        if cache.backing_request_count() != misses {
            return Err(inconsistent(
                trace.len(),
                format!(
                    "{} backing requests for {} misses",
                    cache.backing_request_count(),
                    misses
                ),
            ));
        }

        Ok(PolicyStats {
            hits: cache.hit_count(),
            misses,
            evictions: cache.eviction_count(),
            backing_requests: cache.backing_request_count(),
            resident: cache.len(),
            duration,
            metrics: cache.metrics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(capacity: usize, policies: Vec<PolicyKind>, trace: &[usize]) -> SimulationResult {
        let addresses = trace.iter().max().map_or(0, |max| max + 1);
        SimulationRunner::new(SimulationConfig {
            capacity,
            policies,
            addresses,
        })
        .run(trace)
        .unwrap()
    }

    #[test]
    fn test_every_policy_is_simulated() {
        let trace = [0, 1, 0, 2, 0, 3, 1];
        let result = run(2, PolicyKind::all().to_vec(), &trace);
        assert_eq!(result.stats.len(), 4);
        assert_eq!(result.total_requests, 7);
        assert_eq!(result.unique_addresses, 4);
        for stats in result.stats.values() {
            assert_eq!(stats.hits + stats.misses, 7);
            assert_eq!(stats.backing_requests, stats.misses);
            assert!(stats.resident <= 2);
        }
    }

    #[test]
    fn test_mru_beats_lru_on_a_loop() {
        // Scan of 4 addresses through a 3-entry cache: LRU always misses.
        let trace: Vec<usize> = (0..40).map(|i| i % 4).collect();
        let result = run(3, vec![PolicyKind::Lru, PolicyKind::Mru], &trace);
        assert_eq!(result.stats[&PolicyKind::Lru].hits, 0);
        assert!(result.stats[&PolicyKind::Mru].hits > 0);
    }

    #[test]
    fn test_out_of_range_address_is_reported() {
        let runner = SimulationRunner::new(SimulationConfig {
            capacity: 2,
            policies: vec![PolicyKind::Lfu],
            addresses: 3,
        });
        let err = runner.run(&[0, 1, 7]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Store {
                policy: PolicyKind::Lfu,
                address: 7,
                ..
            }
        ));
    }
}
