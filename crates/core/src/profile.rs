//! Derived analytics records.
//!
//! Everything here is recomputed from the ledger on every invocation and
//! serialized with camelCase field names for the dashboard.

use crate::types::{
    Aggressiveness, BehaviorSegment, Level, Persistence, Region, RouteLength, TimingClass, Trend,
    VehicleType, VendorId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clamp a percentage into [0, 100].
#[inline]
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Behavioral profile of one vendor with at least one bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBehaviorProfile {
    pub vendor_id: VendorId,
    pub company_name: String,
    pub reliability: f64,

    // Participation
    pub total_bids: u32,
    pub auctions_participated: u32,
    pub invited_auctions: u32,
    pub participation_rate: f64,
    pub lanes_bid: u32,
    pub lanes_won: u32,
    pub win_rate: f64,
    pub acceptance_rate: f64,
    pub last_bid_at: DateTime<Utc>,

    // Timing distribution
    pub early_pct: f64,
    pub middle_pct: f64,
    pub late_pct: f64,
    pub extension_pct: f64,

    // Price behavior (discount and decrement are unbounded)
    pub avg_discount: f64,
    pub price_floor_pct: f64,
    pub leading_bid_share: f64,
    pub avg_decrement: f64,
    pub min_bid: f64,
    pub max_bid: f64,

    // Response behavior
    pub response_rate: f64,
    pub avg_response_sec: f64,
    pub max_iterations: u32,

    // Lane preferences
    pub preferred_route: RouteLength,
    pub preferred_region: Region,
    pub preferred_vehicle: VehicleType,
    pub avg_competitors: f64,
    pub competition_tolerance: Level,

    // Trend
    pub trend: Trend,
    pub trend_delta: f64,

    // Classification
    pub timing_class: TimingClass,
    pub aggressiveness: Aggressiveness,
    pub behavior_segment: BehaviorSegment,
    pub persistence: Persistence,
    pub dropout_risk: Level,

    // Forecast
    pub predicted_participation: f64,
    pub predicted_win_rate: f64,
    pub predicted_bid_min: f64,
    pub predicted_bid_max: f64,
}

/// Vendor counts per behavior segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentCounts {
    pub aggressive: u32,
    pub strategic: u32,
    pub opportunistic: u32,
    pub conservative: u32,
}

impl SegmentCounts {
    /// Count one vendor in its segment.
    pub fn record(&mut self, segment: BehaviorSegment) {
        match segment {
            BehaviorSegment::Aggressive => self.aggressive += 1,
            BehaviorSegment::Strategic => self.strategic += 1,
            BehaviorSegment::Opportunistic => self.opportunistic += 1,
            BehaviorSegment::Conservative => self.conservative += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.aggressive + self.strategic + self.opportunistic + self.conservative
    }
}

/// Aggregate totals over all profiled vendors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTotals {
    pub total_vendors: u32,
    /// Participation rate at or above the frequent band.
    pub frequent: u32,
    /// Participation rate within the occasional band.
    pub occasional: u32,
    /// Participation rate above zero but below the occasional band.
    pub rare: u32,
    /// No bid within the inactivity window.
    pub inactive_90_days: u32,
    pub high_dropout_risk: u32,
    pub avg_participation_rate: f64,
    pub segments: SegmentCounts,
}

/// Co-participation intensity of an unordered vendor pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCluster {
    /// Lexicographically smaller vendor id of the pair.
    pub vendor_a: VendorId,
    pub vendor_b: VendorId,
    pub company_a: String,
    pub company_b: String,
    pub shared_lanes: u32,
    pub intensity: f64,
}

/// Severity of a coverage shortfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapSeverity {
    Critical,
    Moderate,
    Healthy,
}

/// Coverage assessment of one route category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGap {
    pub category: String,
    pub vendor_coverage: u32,
    pub severity: GapSeverity,
    pub recommended_action: String,
}

/// Immutable result of one analytics pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub generated_at: DateTime<Utc>,
    /// Sorted by participation rate, descending.
    pub vendors: Vec<VendorBehaviorProfile>,
    pub totals: SnapshotTotals,
    pub clusters: Vec<VendorCluster>,
    pub gaps: Vec<CoverageGap>,
}

impl AnalyticsSnapshot {
    /// Look up a vendor's profile.
    pub fn vendor(&self, vendor_id: &VendorId) -> Option<&VendorBehaviorProfile> {
        self.vendors.iter().find(|p| &p.vendor_id == vendor_id)
    }
}
