//! Forecast scores as weighted blends of features.

use vendor_core::{clamp_pct, Level, TimingClass, Trend};
use vendor_features::VendorFeatures;

/// Forecasts for one vendor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    pub participation: f64,
    pub win_rate: f64,
    pub bid_min: f64,
    pub bid_max: f64,
}

/// Hand-tuned linear blends; stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictiveScorer;

impl PredictiveScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, features: &VendorFeatures, trend: Trend, timing: TimingClass) -> Forecast {
        let participation = 0.45 * features.participation_rate
            + 0.25 * features.reliability
            + 0.20 * trend_factor(trend)
            + 0.10 * competition_factor(features.competition_tolerance);

        let win_rate = 0.40 * features.win_rate
            + 0.25 * (features.avg_discount * 2.0)
            + 0.20 * features.response_rate
            + 0.15 * timing_factor(timing);

        let bid_min = (features.value_min * (1.0 - features.avg_discount / 220.0))
            .round()
            .max(1000.0);
        let bid_max = (features.value_max * (1.0 - features.avg_discount / 300.0))
            .round()
            .max(bid_min + 200.0);

        Forecast {
            participation: clamp_pct(participation),
            win_rate: win_rate.clamp(0.0, 95.0),
            bid_min,
            bid_max,
        }
    }
}

fn trend_factor(trend: Trend) -> f64 {
    match trend {
        Trend::Improving => 80.0,
        Trend::Stable => 55.0,
        Trend::Declining => 35.0,
    }
}

fn competition_factor(tolerance: Level) -> f64 {
    match tolerance {
        Level::High => 70.0,
        Level::Medium => 55.0,
        Level::Low => 40.0,
    }
}

fn timing_factor(timing: TimingClass) -> f64 {
    match timing {
        TimingClass::Sniper | TimingClass::EarlyBird => 70.0,
        TimingClass::ExtensionHunter | TimingClass::StrategicMiddle => 50.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;
    use vendor_core::{Region, RouteLength, VehicleType};

    fn make_features() -> VendorFeatures {
        VendorFeatures {
            vendor_id: "V1".into(),
            company_name: "Deccan Freight".to_string(),
            reliability: 80.0,
            total_bids: 10,
            auctions_participated: 3,
            invited_auctions: 4,
            participation_rate: 75.0,
            lanes_bid: 5,
            lanes_won: 2,
            win_rate: 40.0,
            acceptance_rate: 100.0,
            last_bid_at: Utc::now(),
            early_pct: 20.0,
            middle_pct: 50.0,
            late_pct: 30.0,
            extension_pct: 10.0,
            avg_discount: 11.0,
            price_floor_pct: 18.0,
            leading_bid_share: 40.0,
            avg_decrement: 300.0,
            value_min: 22_000.0,
            value_max: 30_000.0,
            response_rate: 50.0,
            avg_response_sec: 120.0,
            max_iterations: 4,
            preferred_route: RouteLength::ShortHaul,
            preferred_region: Region::South,
            preferred_vehicle: VehicleType::Ftl,
            avg_competitors: 3.0,
            competition_tolerance: Level::Medium,
        }
    }

    #[test]
    fn test_blends() {
        let forecast =
            PredictiveScorer::new().score(&make_features(), Trend::Stable, TimingClass::Sniper);
        // 0.45*75 + 0.25*80 + 0.20*55 + 0.10*55
        assert_relative_eq!(forecast.participation, 70.25, epsilon = 1e-9);
        // 0.40*40 + 0.25*22 + 0.20*50 + 0.15*70
        assert_relative_eq!(forecast.win_rate, 42.0, epsilon = 1e-9);
        // 22000 * (1 - 11/220) = 20900; 30000 * (1 - 11/300) = 28900
        assert_eq!(forecast.bid_min, 20_900.0);
        assert_eq!(forecast.bid_max, 28_900.0);
    }

    #[test]
    fn test_win_rate_capped_at_95() {
        let features = VendorFeatures {
            win_rate: 100.0,
            avg_discount: 60.0,
            response_rate: 100.0,
            ..make_features()
        };
        let forecast =
            PredictiveScorer::new().score(&features, Trend::Improving, TimingClass::EarlyBird);
        assert_eq!(forecast.win_rate, 95.0);
        assert!(forecast.participation <= 100.0);
    }

    #[test]
    fn test_bid_range_floors() {
        let features = VendorFeatures {
            value_min: 500.0,
            value_max: 600.0,
            avg_discount: 0.0,
            ..make_features()
        };
        let forecast = PredictiveScorer::new().score(
            &features,
            Trend::Declining,
            TimingClass::StrategicMiddle,
        );
        assert_eq!(forecast.bid_min, 1000.0);
        assert_eq!(forecast.bid_max, 1200.0);
    }
}
