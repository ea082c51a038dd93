use serde::{Deserialize, Serialize};

/// Storage key for the persisted statistics record.
pub const STATS_KEY: &str = "stats";

/// Persisted slice of the accumulator. Written inside every indexing batch,
/// read back only once at construction to seed the in-memory state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsRecord {
    pub n: u64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
}

/// Point-in-time view with the derived moments included.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub n: u64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

/// Running count/min/max/sum/mean/variance of tokens-written-per-document
/// across the index lifetime.
///
/// Variance uses a Welford accumulator that is not persisted; after a reseed
/// it restarts from zero while n/min/max/sum/mean carry over.
#[derive(Debug, Default)]
pub struct RunningStats {
    n: u64,
    min: f64,
    max: f64,
    sum: f64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        RunningStats::default()
    }

    /// Replace the carried aggregates with a previously persisted record.
    pub fn seed(&mut self, record: StatsRecord) {
        self.n = record.n;
        self.min = record.min;
        self.max = record.max;
        self.sum = record.sum;
        self.mean = record.mean;
        self.m2 = 0.0;
    }

    pub fn record(&mut self, count: f64) {
        if self.n == 0 {
            self.min = count;
            self.max = count;
        } else {
            self.min = self.min.min(count);
            self.max = self.max.max(count);
        }

        self.n += 1;
        self.sum += count;

        let delta = count - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (count - self.mean);
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn record_for_storage(&self) -> StatsRecord {
        StatsRecord {
            n: self.n,
            min: self.min,
            max: self.max,
            sum: self.sum,
            mean: self.mean,
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let variance = if self.n > 0 { self.m2 / self.n as f64 } else { 0.0 };

        StatsSnapshot {
            n: self.n,
            min: self.min,
            max: self.max,
            sum: self.sum,
            mean: self.mean,
            variance,
            standard_deviation: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_basic_aggregates() {
        let mut stats = RunningStats::new();
        stats.record(2.0);
        stats.record(4.0);
        stats.record(6.0);

        let snap = stats.snapshot();
        assert_eq!(snap.n, 3);
        assert_eq!(snap.min, 2.0);
        assert_eq!(snap.max, 6.0);
        assert_eq!(snap.sum, 12.0);
        assert_eq!(snap.mean, 4.0);
        assert!((snap.variance - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn seed_carries_aggregates_and_resets_variance() {
        let mut stats = RunningStats::new();
        stats.seed(StatsRecord {
            n: 10,
            min: 1.0,
            max: 40.0,
            sum: 100.0,
            mean: 10.0,
        });

        assert_eq!(stats.max(), 40.0);
        let snap = stats.snapshot();
        assert_eq!(snap.n, 10);
        assert_eq!(snap.variance, 0.0);

        stats.record(21.0);
        let snap = stats.snapshot();
        assert_eq!(snap.n, 11);
        assert_eq!(snap.max, 40.0);
        assert_eq!(snap.sum, 121.0);
        assert_eq!(snap.mean, 11.0);
    }

    #[test]
    fn empty_snapshot_is_zeroed() {
        let stats = RunningStats::new();
        assert!(stats.is_empty());
        let snap = stats.snapshot();
        assert_eq!(snap.n, 0);
        assert_eq!(snap.standard_deviation, 0.0);
    }
}
