// Statistics reporting for cache simulation

use crate::models::{CsvResultRow, PolicyStats, SimulationResult};
use policy_cache::PolicyKind;
use std::collections::BTreeMap;
use std::path::Path;

/// Reports statistics from a simulation run
pub struct SimulationStats {
    /// Stats for each policy
    stats: BTreeMap<PolicyKind, PolicyStats>,
    total_requests: usize,
    unique_addresses: usize,
    capacity: usize,
}

impl SimulationStats {
    /// Create SimulationStats from a SimulationResult
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            stats: result.stats.clone(),
            total_requests: result.total_requests,
            unique_addresses: result.unique_addresses,
            capacity: result.capacity,
        }
    }

    /// Policy with the highest hit rate, if any policy ran
    pub fn best_policy(&self) -> Option<PolicyKind> {
        self.stats
            .iter()
            .max_by(|(_, a), (_, b)| a.hit_rate().total_cmp(&b.hit_rate()))
            .map(|(&policy, _)| policy)
    }

    /// Print a summary report of the simulation results
    pub fn print_summary(&self) {
        println!("\nCache Simulation Summary");
        println!("========================");
        println!("Total requests: {}", self.total_requests);
        println!("Unique addresses: {}", self.unique_addresses);
        println!("Cache capacity: {} entries", self.capacity);

        println!("\nResults by Policy:");
        println!(
            "{:<8} {:>10} {:>10} {:>9} {:>10} {:>10} {:>9} {:>12}",
            "Policy", "Hits", "Misses", "HitRate", "Evictions", "Backing", "Resident", "Ops/sec"
        );
        println!("{}", "-".repeat(86));

        for (policy, stats) in &self.stats {
            println!(
                "{:<8} {:>10} {:>10} {:>8.2}% {:>10} {:>10} {:>9} {:>12.0}",
                policy.name(),
                stats.hits,
                stats.misses,
                stats.hit_rate(),
                stats.evictions,
                stats.backing_requests,
                stats.resident,
                stats.ops_per_sec()
            );
        }

        if let Some(best) = self.best_policy() {
            println!("\nHighest hit rate: {best}");
        }
    }

    /// Build the CSV rows, one per policy
    pub fn csv_rows(&self) -> Vec<CsvResultRow> {
        self.stats
            .iter()
            .map(|(policy, stats)| CsvResultRow {
                policy: policy.name().to_string(),
                capacity: self.capacity,
                requests: stats.hits + stats.misses,
                hits: stats.hits,
                misses: stats.misses,
                hit_rate: stats.hit_rate(),
                evictions: stats.evictions,
                backing_requests: stats.backing_requests,
                resident: stats.resident,
                duration_ns: u64::try_from(stats.duration.as_nanos()).unwrap_or(u64::MAX),
                ops_per_sec: stats.ops_per_sec(),
            })
            .collect()
    }

    /// Export results to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in self.csv_rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
