//! Bid timing distribution.
//!
//! Buckets each bid by its normalized position within the lane's duration.

use vendor_core::TimingConfig;

/// Counts of bids per timing bucket.
#[derive(Debug, Clone, Default)]
pub struct TimingHistogram {
    early: u32,
    middle: u32,
    late: u32,
    /// Overlaps `late`.
    extension: u32,
    total: u32,
}

impl TimingHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one bid at normalized lane position `p`.
    pub fn record(&mut self, p: f64, cutoffs: &TimingConfig) {
        if p <= cutoffs.early_cutoff {
            self.early += 1;
        } else if p <= cutoffs.late_cutoff {
            self.middle += 1;
        } else {
            self.late += 1;
        }
        if p >= cutoffs.extension_cutoff {
            self.extension += 1;
        }
        self.total += 1;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn early_pct(&self) -> f64 {
        share_pct(self.early, self.total)
    }

    pub fn middle_pct(&self) -> f64 {
        share_pct(self.middle, self.total)
    }

    pub fn late_pct(&self) -> f64 {
        share_pct(self.late, self.total)
    }

    pub fn extension_pct(&self) -> f64 {
        share_pct(self.extension, self.total)
    }
}

/// `count / max(1, total) * 100`.
#[inline]
pub fn share_pct(count: u32, total: u32) -> f64 {
    count as f64 / total.max(1) as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bucket_boundaries() {
        let cutoffs = TimingConfig::default();
        let mut hist = TimingHistogram::new();
        for p in [0.0, 0.25, 0.26, 0.75, 0.76, 0.9, 1.2] {
            hist.record(p, &cutoffs);
        }
        assert_eq!(hist.total(), 7);
        assert_relative_eq!(hist.early_pct(), 2.0 / 7.0 * 100.0);
        assert_relative_eq!(hist.middle_pct(), 2.0 / 7.0 * 100.0);
        assert_relative_eq!(hist.late_pct(), 3.0 / 7.0 * 100.0);
        assert_relative_eq!(hist.extension_pct(), 2.0 / 7.0 * 100.0);
    }

    #[test]
    fn test_extension_overlaps_late() {
        let cutoffs = TimingConfig::default();
        let mut hist = TimingHistogram::new();
        hist.record(0.95, &cutoffs);
        assert_eq!(hist.late_pct(), 100.0);
        assert_eq!(hist.extension_pct(), 100.0);
    }

    #[test]
    fn test_empty_histogram_is_zero() {
        let hist = TimingHistogram::new();
        assert_eq!(hist.early_pct(), 0.0);
        assert_eq!(share_pct(0, 0), 0.0);
    }
}
