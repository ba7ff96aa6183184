//! LFU Cache Metrics
//!
//! Frequency-level figures reported by the LFU policy in addition to the
//! core metrics every policy shares.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (reported alongside [`CoreCacheMetrics`])
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Smallest access count among resident entries (0 when empty)
    pub min_frequency: u64,

    /// Largest access count among resident entries (0 when empty)
    pub max_frequency: u64,

    /// Total number of frequency increments (one per cache hit)
    pub total_frequency_increments: u64,

    /// Number of distinct frequency buckets currently in use
    pub active_frequency_levels: u64,

    /// Sum of the access counts of resident entries
    pub resident_frequency_total: u64,

    /// Number of resident entries
    pub resident_entries: u64,
}

impl LfuCacheMetrics {
    /// Creates an empty set of LFU metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment (a hit promoted an entry)
    pub fn record_frequency_increment(&mut self) {
        self.total_frequency_increments += 1;
        self.resident_frequency_total += 1;
    }

    /// Records a new resident entry with an access count of 1
    pub fn record_admission(&mut self) {
        self.resident_entries += 1;
        self.resident_frequency_total += 1;
    }

    /// Records the removal of a resident entry that had `frequency` accesses
    pub fn record_removal(&mut self, frequency: u64) {
        self.resident_entries = self.resident_entries.saturating_sub(1);
        self.resident_frequency_total = self.resident_frequency_total.saturating_sub(frequency);
    }

    /// Refreshes min/max/level figures from the current frequency buckets
    pub fn update_frequency_levels<T>(&mut self, frequency_buckets: &BTreeMap<usize, T>) {
        self.active_frequency_levels = frequency_buckets.len() as u64;
        self.min_frequency = frequency_buckets.keys().next().map_or(0, |&f| f as u64);
        self.max_frequency = frequency_buckets.keys().next_back().map_or(0, |&f| f as u64);
    }

    /// Mean access count of the resident entries (0.0 when empty)
    pub fn average_frequency(&self) -> f64 {
        if self.resident_entries > 0 {
            self.resident_frequency_total as f64 / self.resident_entries as f64
        } else {
            0.0
        }
    }

    /// Adds the LFU figures to a core metrics report
    pub fn extend_report(&self, metrics: &mut BTreeMap<String, f64>) {
        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert(
            "average_frequency".to_string(),
            self.average_frequency(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_levels_track_bucket_bounds() {
        let mut metrics = LfuCacheMetrics::new();
        let mut buckets: BTreeMap<usize, ()> = BTreeMap::new();
        metrics.update_frequency_levels(&buckets);
        assert_eq!(metrics.min_frequency, 0);
        assert_eq!(metrics.active_frequency_levels, 0);

        buckets.insert(1, ());
        buckets.insert(4, ());
        metrics.update_frequency_levels(&buckets);
        assert_eq!(metrics.min_frequency, 1);
        assert_eq!(metrics.max_frequency, 4);
        assert_eq!(metrics.active_frequency_levels, 2);
    }

    #[test]
    fn test_average_frequency_is_mean_of_resident_counts() {
        let mut metrics = LfuCacheMetrics::new();
        assert_eq!(metrics.average_frequency(), 0.0);

        // Three residents with access counts 6, 1 and 1.
        for _ in 0..3 {
            metrics.record_admission();
        }
        for _ in 0..5 {
            metrics.record_frequency_increment();
        }
        assert!((metrics.average_frequency() - 8.0 / 3.0).abs() < f64::EPSILON);

        metrics.record_removal(1);
        assert!((metrics.average_frequency() - 3.5).abs() < f64::EPSILON);
        assert_eq!(metrics.total_frequency_increments, 5);
    }

    #[test]
    fn test_extend_report() {
        let mut metrics = LfuCacheMetrics::new();
        metrics.record_admission();
        metrics.record_admission();
        metrics.record_frequency_increment();

        let mut report = BTreeMap::new();
        metrics.extend_report(&mut report);
        assert_eq!(report.get("total_frequency_increments"), Some(&1.0));
        assert_eq!(report.get("average_frequency"), Some(&1.5));
    }
}
