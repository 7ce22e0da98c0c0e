//! Configuration structures for the vendor analytics engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the analytics engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bid timing bucket configuration.
    pub timing: TimingConfig,
    /// Trend window configuration.
    pub trend: TrendConfig,
    /// Lane preference voting configuration.
    pub preferences: PreferenceConfig,
    /// Participation bands used by the report totals.
    pub participation: ParticipationConfig,
    /// Vendor clustering configuration.
    pub clustering: ClusteringConfig,
    /// Outbid response configuration.
    pub response: ResponseConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check that thresholds are internally consistent.
    pub fn validate(&self) -> Result<()> {
        let t = &self.timing;
        if !(0.0 < t.early_cutoff && t.early_cutoff < t.late_cutoff && t.late_cutoff <= 1.0) {
            return Err(Error::config(format!(
                "timing cutoffs must satisfy 0 < early ({}) < late ({}) <= 1",
                t.early_cutoff, t.late_cutoff
            )));
        }
        if !(0.0..=1.0).contains(&t.extension_cutoff) {
            return Err(Error::config("extension_cutoff must lie in [0, 1]"));
        }
        if self.trend.recent_window_days == 0 || self.trend.prior_divisor_days == 0 {
            return Err(Error::config("trend windows must be positive"));
        }
        if self.preferences.dominance_ratio < 1.0 {
            return Err(Error::config("dominance_ratio must be at least 1.0"));
        }
        if self.participation.occasional_pct > self.participation.frequent_pct {
            return Err(Error::config("occasional_pct must not exceed frequent_pct"));
        }
        Ok(())
    }
}

/// Normalized-position cutoffs for bucketing bids within a lane's duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Bids at or before this position are early.
    pub early_cutoff: f64,
    /// Bids after this position are late.
    pub late_cutoff: f64,
    /// Bids at or after this position fall in the extension window.
    pub extension_cutoff: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            early_cutoff: 0.25,
            late_cutoff: 0.75,
            extension_cutoff: 0.90,
        }
    }
}

/// Recent-vs-prior activity comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Length of the recent window in days.
    pub recent_window_days: u32,
    /// Divisor applied to the prior bid count.
    pub prior_divisor_days: u32,
    /// Percentage change beyond which a trend is Improving/Declining.
    pub change_threshold_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 90,
            prior_divisor_days: 180,
            change_threshold_pct: 8.0,
        }
    }
}

/// Majority voting over lane-name heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceConfig {
    /// Winner must exceed the runner-up by this factor.
    pub dominance_ratio: f64,
    /// Explicit distances at or above this are long haul.
    pub long_haul_km: u32,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            dominance_ratio: 1.3,
            long_haul_km: 500,
        }
    }
}

/// Participation bands for the snapshot totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationConfig {
    /// Minimum participation rate for a frequent vendor.
    pub frequent_pct: f64,
    /// Minimum participation rate for an occasional vendor.
    pub occasional_pct: f64,
    /// Days without a bid before a vendor counts as inactive.
    pub inactive_days: u32,
}

impl Default for ParticipationConfig {
    fn default() -> Self {
        Self {
            frequent_pct: 80.0,
            occasional_pct: 40.0,
            inactive_days: 90,
        }
    }
}

/// Co-participation clustering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of pairs kept in the snapshot.
    pub top_pairs: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { top_pairs: 12 }
    }
}

/// Outbid response tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Reported average latency when a vendor never responded.
    pub no_response_sentinel_sec: f64,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            no_response_sentinel_sec: 999.0,
        }
    }
}
