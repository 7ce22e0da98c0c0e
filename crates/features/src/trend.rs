//! Recent-vs-prior bidding activity.

use chrono::{DateTime, Duration, Utc};
use vendor_core::{BidEvent, Trend, TrendConfig};

/// Trend label with its percentage change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendReading {
    pub trend: Trend,
    pub delta_pct: f64,
}

/// Compares the recent window's bid rate with the rest of history.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: &TrendConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn analyze(&self, bids: &[&BidEvent], as_of: DateTime<Utc>) -> TrendReading {
        let window_start = as_of - Duration::days(i64::from(self.config.recent_window_days));
        let recent = bids.iter().filter(|b| b.timestamp >= window_start).count();
        let prior = bids.len() - recent;

        let recent_rate = recent as f64 / f64::from(self.config.recent_window_days);
        let prior_rate = prior as f64 / f64::from(self.config.prior_divisor_days);
        let delta_pct = if prior_rate > 0.0 {
            (recent_rate - prior_rate) / prior_rate * 100.0
        } else {
            0.0
        };

        let threshold = self.config.change_threshold_pct;
        let trend = if delta_pct > threshold {
            Trend::Improving
        } else if delta_pct < -threshold {
            Trend::Declining
        } else {
            Trend::Stable
        };

        TrendReading { trend, delta_pct }
    }
}
