//! Snapshot assembly.
//!
//! Merges features, trend, labels and forecasts into profiles, then composes
//! profiles, totals, clusters and gaps into one `AnalyticsSnapshot`.

use crate::classifier::Classification;
use crate::scorer::Forecast;
use chrono::{DateTime, Duration, Utc};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use vendor_core::{
    AnalyticsSnapshot, CoverageGap, Level, ParticipationConfig, SegmentCounts, SnapshotTotals,
    VendorBehaviorProfile, VendorCluster,
};
use vendor_features::{TrendReading, VendorFeatures};

/// Merge the per-vendor outputs into a profile.
pub fn build_profile(
    features: VendorFeatures,
    trend: TrendReading,
    labels: Classification,
    forecast: Forecast,
) -> VendorBehaviorProfile {
    VendorBehaviorProfile {
        vendor_id: features.vendor_id,
        company_name: features.company_name,
        reliability: features.reliability,
        total_bids: features.total_bids,
        auctions_participated: features.auctions_participated,
        invited_auctions: features.invited_auctions,
        participation_rate: features.participation_rate,
        lanes_bid: features.lanes_bid,
        lanes_won: features.lanes_won,
        win_rate: features.win_rate,
        acceptance_rate: features.acceptance_rate,
        last_bid_at: features.last_bid_at,
        early_pct: features.early_pct,
        middle_pct: features.middle_pct,
        late_pct: features.late_pct,
        extension_pct: features.extension_pct,
        avg_discount: features.avg_discount,
        price_floor_pct: features.price_floor_pct,
        leading_bid_share: features.leading_bid_share,
        avg_decrement: features.avg_decrement,
        min_bid: features.value_min,
        max_bid: features.value_max,
        response_rate: features.response_rate,
        avg_response_sec: features.avg_response_sec,
        max_iterations: features.max_iterations,
        preferred_route: features.preferred_route,
        preferred_region: features.preferred_region,
        preferred_vehicle: features.preferred_vehicle,
        avg_competitors: features.avg_competitors,
        competition_tolerance: features.competition_tolerance,
        trend: trend.trend,
        trend_delta: trend.delta_pct,
        timing_class: labels.timing_class,
        aggressiveness: labels.aggressiveness,
        behavior_segment: labels.behavior_segment,
        persistence: labels.persistence,
        dropout_risk: labels.dropout_risk,
        predicted_participation: forecast.participation,
        predicted_win_rate: forecast.win_rate,
        predicted_bid_min: forecast.bid_min,
        predicted_bid_max: forecast.bid_max,
    }
}

/// Composes the final snapshot. Assembly cannot fail.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    bands: ParticipationConfig,
}

impl ReportAssembler {
    pub fn new(bands: &ParticipationConfig) -> Self {
        Self {
            bands: bands.clone(),
        }
    }

    pub fn assemble(
        &self,
        generated_at: DateTime<Utc>,
        mut vendors: Vec<VendorBehaviorProfile>,
        clusters: Vec<VendorCluster>,
        gaps: Vec<CoverageGap>,
    ) -> AnalyticsSnapshot {
        // Stable sort: equal rates keep vendor id order.
        vendors.sort_by_key(|p| Reverse(OrderedFloat(p.participation_rate)));
        let totals = self.totals(&vendors, generated_at);

        AnalyticsSnapshot {
            generated_at,
            vendors,
            totals,
            clusters,
            gaps,
        }
    }

    pub fn totals(
        &self,
        vendors: &[VendorBehaviorProfile],
        as_of: DateTime<Utc>,
    ) -> SnapshotTotals {
        let inactive_cutoff = as_of - Duration::days(i64::from(self.bands.inactive_days));
        let mut totals = SnapshotTotals {
            total_vendors: vendors.len() as u32,
            ..SnapshotTotals::default()
        };
        let mut segments = SegmentCounts::default();
        let mut rate_sum = 0.0;

        for profile in vendors {
            let rate = profile.participation_rate;
            if rate >= self.bands.frequent_pct {
                totals.frequent += 1;
            } else if rate >= self.bands.occasional_pct {
                totals.occasional += 1;
            } else if rate > 0.0 {
                totals.rare += 1;
            }
            if profile.last_bid_at < inactive_cutoff {
                totals.inactive_90_days += 1;
            }
            if profile.dropout_risk == Level::High {
                totals.high_dropout_risk += 1;
            }
            segments.record(profile.behavior_segment);
            rate_sum += rate;
        }

        totals.avg_participation_rate = rate_sum / vendors.len().max(1) as f64;
        totals.segments = segments;
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vendor_core::{
        Aggressiveness, BehaviorSegment, Persistence, Region, RouteLength, TimingClass, Trend,
        VehicleType,
    };

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    fn make_features(id: &str, participation: f64, days_since_bid: i64) -> VendorFeatures {
        VendorFeatures {
            vendor_id: id.into(),
            company_name: format!("{id} Roadways"),
            reliability: 95.0,
            total_bids: 4,
            auctions_participated: 2,
            invited_auctions: 2,
            participation_rate: participation,
            lanes_bid: 2,
            lanes_won: 1,
            win_rate: 50.0,
            acceptance_rate: 100.0,
            last_bid_at: as_of() - Duration::days(days_since_bid),
            early_pct: 50.0,
            middle_pct: 25.0,
            late_pct: 25.0,
            extension_pct: 0.0,
            avg_discount: 10.0,
            price_floor_pct: 12.0,
            leading_bid_share: 50.0,
            avg_decrement: 200.0,
            value_min: 10_000.0,
            value_max: 12_000.0,
            response_rate: 0.0,
            avg_response_sec: 999.0,
            max_iterations: 2,
            preferred_route: RouteLength::ShortHaul,
            preferred_region: Region::West,
            preferred_vehicle: VehicleType::Ftl,
            avg_competitors: 1.0,
            competition_tolerance: Level::Low,
        }
    }

    fn make_profile(
        id: &str,
        participation: f64,
        days_since_bid: i64,
        segment: BehaviorSegment,
    ) -> VendorBehaviorProfile {
        build_profile(
            make_features(id, participation, days_since_bid),
            TrendReading {
                trend: Trend::Stable,
                delta_pct: 0.0,
            },
            Classification {
                timing_class: TimingClass::EarlyBird,
                aggressiveness: Aggressiveness::Conservative,
                behavior_segment: segment,
                persistence: Persistence::Low,
                dropout_risk: Level::Low,
            },
            Forecast {
                participation: 60.0,
                win_rate: 40.0,
                bid_min: 9_500.0,
                bid_max: 11_600.0,
            },
        )
    }

    #[test]
    fn test_build_profile_carries_fields() {
        let profile = make_profile("V1", 75.0, 3, BehaviorSegment::Strategic);
        assert_eq!(profile.company_name, "V1 Roadways");
        assert_eq!(profile.min_bid, 10_000.0);
        assert_eq!(profile.predicted_bid_max, 11_600.0);
        assert_eq!(profile.behavior_segment, BehaviorSegment::Strategic);
    }

    #[test]
    fn test_sorted_by_participation_descending() {
        let assembler = ReportAssembler::new(&ParticipationConfig::default());
        let snapshot = assembler.assemble(
            as_of(),
            vec![
                make_profile("V1", 20.0, 1, BehaviorSegment::Conservative),
                make_profile("V2", 90.0, 1, BehaviorSegment::Aggressive),
                make_profile("V3", 50.0, 1, BehaviorSegment::Strategic),
            ],
            vec![],
            vec![],
        );
        let order: Vec<&str> = snapshot.vendors.iter().map(|p| p.vendor_id.as_str()).collect();
        assert_eq!(order, vec!["V2", "V3", "V1"]);
    }

    #[test]
    fn test_totals_bands() {
        let assembler = ReportAssembler::new(&ParticipationConfig::default());
        let vendors = vec![
            make_profile("V1", 80.0, 10, BehaviorSegment::Aggressive),
            make_profile("V2", 79.9, 10, BehaviorSegment::Strategic),
            make_profile("V3", 40.0, 120, BehaviorSegment::Strategic),
            make_profile("V4", 39.0, 91, BehaviorSegment::Opportunistic),
            make_profile("V5", 0.0, 89, BehaviorSegment::Conservative),
        ];
        let totals = assembler.totals(&vendors, as_of());

        assert_eq!(totals.total_vendors, 5);
        assert_eq!(totals.frequent, 1);
        assert_eq!(totals.occasional, 2);
        assert_eq!(totals.rare, 1);
        assert_eq!(totals.inactive_90_days, 2);
        assert_eq!(totals.segments.strategic, 2);
        assert_eq!(totals.segments.total(), totals.total_vendors);
        assert!((totals.avg_participation_rate - 238.9 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let assembler = ReportAssembler::new(&ParticipationConfig::default());
        let snapshot = assembler.assemble(as_of(), vec![], vec![], vec![]);
        assert!(snapshot.vendors.is_empty());
        assert_eq!(snapshot.totals, SnapshotTotals::default());
    }
}
