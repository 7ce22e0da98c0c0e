//! Ledger records and categorical labels shared across the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a bidding vendor.
    VendorId
);
string_id!(
    /// Identifier of a lane within an auction.
    LaneId
);
string_id!(
    /// Identifier of an auction.
    AuctionId
);

// ============================================================================
// Ledger records (externally owned, read-only here)
// ============================================================================

/// Lifecycle state of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

/// An auction with its lanes and invite list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub auction_id: AuctionId,
    pub name: String,
    pub status: AuctionStatus,
    /// Lanes offered in this auction.
    pub lane_ids: Vec<LaneId>,
    /// Invited vendors. Empty means the auction was open to every vendor.
    pub invited_vendors: Vec<VendorId>,
}

impl Auction {
    /// Whether the vendor was invited to (or could bid in) this auction.
    pub fn is_invited(&self, vendor_id: &VendorId) -> bool {
        self.invited_vendors.is_empty() || self.invited_vendors.contains(vendor_id)
    }
}

/// A vendor's price offer on a lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidEvent {
    pub vendor_id: VendorId,
    pub lane_id: LaneId,
    pub auction_id: AuctionId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// A single shippable route within an auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub lane_id: LaneId,
    pub auction_id: AuctionId,
    /// Free-text name, mined for route length, geography and vehicle type.
    pub lane_name: String,
    pub base_price: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Lane {
    /// Lane duration in milliseconds, floored at 1.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds().max(1)
    }

    /// Normalized position of an instant within the lane's duration.
    ///
    /// Not clamped: bids before the start are negative, after the end exceed 1.
    #[inline]
    pub fn position_of(&self, ts: DateTime<Utc>) -> f64 {
        (ts - self.start_time).num_milliseconds() as f64 / self.duration_ms() as f64
    }
}

/// Acceptance status of an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwardStatus {
    Accepted,
    Pending,
    Rejected,
    Withdrawn,
}

/// Outcome record assigning a lane to a winning vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    pub lane_id: LaneId,
    pub vendor_id: VendorId,
    pub status: AwardStatus,
}

impl Award {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.status == AwardStatus::Accepted
    }
}

/// Directory data about a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSummary {
    pub company_name: String,
    /// Reliability score in [0, 100].
    pub reliability: f64,
}

// ============================================================================
// Lane-name heuristics
// ============================================================================

/// Geographic region of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    #[serde(rename = "Pan-India")]
    PanIndia,
}

/// Route length bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteLength {
    #[serde(rename = "Long Haul")]
    LongHaul,
    #[serde(rename = "Short Haul")]
    ShortHaul,
    Mixed,
}

/// Vehicle load type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "FTL")]
    Ftl,
    #[serde(rename = "LTL")]
    Ltl,
    Mixed,
}

/// Attributes inferred from a lane name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneTraits {
    pub region: Region,
    pub route_length: RouteLength,
    pub vehicle: VehicleType,
}

// ============================================================================
// Classification labels
// ============================================================================

/// When in a lane's duration a vendor tends to bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingClass {
    #[serde(rename = "Extension Hunter")]
    ExtensionHunter,
    #[serde(rename = "Early Bird")]
    EarlyBird,
    Sniper,
    #[serde(rename = "Strategic Middle")]
    StrategicMiddle,
}

/// How steeply a vendor discounts relative to base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggressiveness {
    #[serde(rename = "Very Aggressive")]
    VeryAggressive,
    Aggressive,
    Balanced,
    Conservative,
}

/// Top-level strategic archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorSegment {
    Aggressive,
    Strategic,
    Opportunistic,
    Conservative,
}

/// How many times a vendor re-bids on a single lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persistence {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
}

/// Shared three-level scale for dropout risk and competition tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

/// Direction of recent bidding activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for TimingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimingClass::ExtensionHunter => "Extension Hunter",
            TimingClass::EarlyBird => "Early Bird",
            TimingClass::Sniper => "Sniper",
            TimingClass::StrategicMiddle => "Strategic Middle",
        })
    }
}

impl fmt::Display for Aggressiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Aggressiveness::VeryAggressive => "Very Aggressive",
            Aggressiveness::Aggressive => "Aggressive",
            Aggressiveness::Balanced => "Balanced",
            Aggressiveness::Conservative => "Conservative",
        })
    }
}

impl fmt::Display for BehaviorSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BehaviorSegment::Aggressive => "Aggressive",
            BehaviorSegment::Strategic => "Strategic",
            BehaviorSegment::Opportunistic => "Opportunistic",
            BehaviorSegment::Conservative => "Conservative",
        })
    }
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Persistence::VeryHigh => "Very High",
            Persistence::High => "High",
            Persistence::Medium => "Medium",
            Persistence::Low => "Low",
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        })
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Improving => "Improving",
            Trend::Stable => "Stable",
            Trend::Declining => "Declining",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_lane(minutes: i64) -> Lane {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Lane {
            lane_id: "L1".into(),
            auction_id: "A1".into(),
            lane_name: "Mumbai - Pune FTL".to_string(),
            base_price: 50_000.0,
            start_time: start,
            end_time: start + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_lane_position() {
        let lane = make_lane(60);
        let ts = lane.start_time + Duration::minutes(45);
        assert!((lane.position_of(ts) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_duration_lane_does_not_divide_by_zero() {
        let lane = make_lane(0);
        assert_eq!(lane.duration_ms(), 1);
        assert!(lane.position_of(lane.start_time).is_finite());
    }

    #[test]
    fn test_open_auction_invites_everyone() {
        let mut auction = Auction {
            auction_id: "A1".into(),
            name: "Q1 West".to_string(),
            status: AuctionStatus::Completed,
            lane_ids: vec![],
            invited_vendors: vec![],
        };
        assert!(auction.is_invited(&"V9".into()));

        auction.invited_vendors = vec!["V1".into()];
        assert!(auction.is_invited(&"V1".into()));
        assert!(!auction.is_invited(&"V9".into()));
    }

    #[test]
    fn test_labels_serialize_as_display_names() {
        let json = serde_json::to_string(&TimingClass::ExtensionHunter).unwrap();
        assert_eq!(json, "\"Extension Hunter\"");
        let json = serde_json::to_string(&Region::PanIndia).unwrap();
        assert_eq!(json, "\"Pan-India\"");
        assert_eq!(Aggressiveness::VeryAggressive.to_string(), "Very Aggressive");
    }

    #[test]
    fn test_display_matches_serialized_label() {
        fn check<T: Serialize + fmt::Display>(label: T) {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{label}\""));
        }
        check(Persistence::VeryHigh);
        check(Persistence::Low);
        check(Level::Medium);
        check(Trend::Declining);
        check(TimingClass::StrategicMiddle);
        check(BehaviorSegment::Opportunistic);
    }
}
