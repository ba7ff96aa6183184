//! Synthetic address traces
//!
//! Traces are reproducible: the same configuration and seed always produce the
//! same sequence.

use crate::models::AccessPattern;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Share of requests that go to the hot set in [`AccessPattern::Hotset`]
const HOT_TRAFFIC_PERCENT: u32 = 80;
/// Share of addresses that form the hot set
const HOT_ADDRESS_PERCENT: usize = 20;

/// Parameters for generating an address trace
#[derive(Debug, Clone)]
pub struct TraceConfig {
    pub pattern: AccessPattern,
    /// Number of lookups in the trace
    pub requests: usize,
    /// Addresses are drawn from `0..addresses`
    pub addresses: usize,
    pub seed: u64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            pattern: AccessPattern::Hotset,
            requests: 10_000,
            addresses: 64,
            seed: 42,
        }
    }
}

/// Generator for synthetic address traces
pub struct TraceGenerator {
    config: TraceConfig,
    rng: StdRng,
}

impl TraceGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TraceConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generate the full trace. Empty when there are no addresses to draw from.
    pub fn generate(&mut self) -> Vec<usize> {
        let TraceConfig {
            pattern,
            requests,
            addresses,
            ..
        } = self.config;
        if addresses == 0 {
            return Vec::new();
        }

        tracing::debug!(%pattern, requests, addresses, "generating trace");
        match pattern {
            AccessPattern::Uniform => (0..requests)
                .map(|_| self.rng.gen_range(0..addresses))
                .collect(),
            AccessPattern::Loop => (0..requests).map(|i| i % addresses).collect(),
            AccessPattern::Hotset => {
                let hot = (addresses * HOT_ADDRESS_PERCENT / 100).max(1);
                (0..requests)
                    .map(|_| {
                        let cold = addresses - hot;
                        if cold == 0 || self.rng.gen_ratio(HOT_TRAFFIC_PERCENT, 100) {
                            self.rng.gen_range(0..hot)
                        } else {
                            hot + self.rng.gen_range(0..cold)
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Write a trace file: a header comment followed by one address per line
pub fn write_trace(path: &Path, config: &TraceConfig, trace: &[usize]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(
        writer,
        "# pattern={} requests={} addresses={} seed={}",
        config.pattern, config.requests, config.addresses, config.seed
    )?;
    for address in trace {
        writeln!(writer, "{address}")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(pattern: AccessPattern, requests: usize, addresses: usize, seed: u64) -> Vec<usize> {
        TraceGenerator::new(TraceConfig {
            pattern,
            requests,
            addresses,
            seed,
        })
        .generate()
    }

    #[test]
    fn test_same_seed_same_trace() {
        let a = generate(AccessPattern::Uniform, 500, 32, 7);
        let b = generate(AccessPattern::Uniform, 500, 32, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|&address| address < 32));
    }

    #[test]
    fn test_loop_scans_in_order() {
        let trace = generate(AccessPattern::Loop, 7, 3, 0);
        assert_eq!(trace, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_hotset_is_skewed() {
        let trace = generate(AccessPattern::Hotset, 10_000, 100, 1);
        let hot = trace.iter().filter(|&&address| address < 20).count();
        // 80% expected; allow generous slack for the sample.
        assert!(hot > 7_000 && hot < 9_000, "hot share was {hot}");
        assert!(trace.iter().all(|&address| address < 100));
    }

    #[test]
    fn test_hotset_with_tiny_address_space() {
        let trace = generate(AccessPattern::Hotset, 50, 1, 3);
        assert!(trace.iter().all(|&address| address == 0));
    }

    #[test]
    fn test_no_addresses_gives_empty_trace() {
        assert!(generate(AccessPattern::Uniform, 10, 0, 0).is_empty());
    }
}
