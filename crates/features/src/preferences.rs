//! Lane preference voting.
//!
//! A category only wins if it beats the runner-up by the dominance ratio;
//! weak majorities fall back to the caller's catch-all.

use vendor_core::{Level, Region, RouteLength, VehicleType};

/// Vote counts per category, in first-seen order.
#[derive(Debug, Clone)]
pub struct VoteTally<K> {
    votes: Vec<(K, u32)>,
}

impl<K: Copy + PartialEq> VoteTally<K> {
    pub fn new() -> Self {
        Self { votes: Vec::new() }
    }

    pub fn vote(&mut self, key: K) {
        match self.votes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.votes.push((key, 1)),
        }
    }

    pub fn count(&self, key: K) -> u32 {
        self.votes
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, c)| *c)
    }

    /// The leading category if it exceeds the runner-up by `ratio`, else `fallback`.
    pub fn dominant_or(&self, ratio: f64, fallback: K) -> K {
        let mut ranked: Vec<(K, u32)> = self.votes.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        match ranked.as_slice() {
            [] => fallback,
            [(top, _)] => *top,
            [(top, first), (_, second), ..] => {
                if *first as f64 > *second as f64 * ratio {
                    *top
                } else {
                    fallback
                }
            }
        }
    }
}

impl<K: Copy + PartialEq> Default for VoteTally<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Route, region and vehicle votes across the lanes a vendor bid on.
#[derive(Debug, Clone, Default)]
pub struct LanePreferences {
    pub routes: VoteTally<RouteLength>,
    pub regions: VoteTally<Region>,
    pub vehicles: VoteTally<VehicleType>,
}

impl LanePreferences {
    pub fn preferred_route(&self, ratio: f64) -> RouteLength {
        self.routes.dominant_or(ratio, RouteLength::Mixed)
    }

    pub fn preferred_region(&self, ratio: f64) -> Region {
        self.regions.dominant_or(ratio, Region::PanIndia)
    }

    pub fn preferred_vehicle(&self, ratio: f64) -> VehicleType {
        self.vehicles.dominant_or(ratio, VehicleType::Mixed)
    }
}

/// Competition tolerance from the average number of rivals per lane.
pub fn competition_tolerance(avg_competitors: f64) -> Level {
    if avg_competitors >= 5.0 {
        Level::High
    } else if avg_competitors >= 3.0 {
        Level::Medium
    } else {
        Level::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_requires_margin() {
        let mut tally = VoteTally::new();
        for _ in 0..5 {
            tally.vote(Region::West);
        }
        for _ in 0..4 {
            tally.vote(Region::North);
        }
        // 5 is not > 4 * 1.3
        assert_eq!(tally.dominant_or(1.3, Region::PanIndia), Region::PanIndia);

        tally.vote(Region::West);
        // 6 > 5.2
        assert_eq!(tally.dominant_or(1.3, Region::PanIndia), Region::West);
    }

    #[test]
    fn test_single_category_wins() {
        let mut tally = VoteTally::new();
        tally.vote(VehicleType::Ltl);
        assert_eq!(tally.dominant_or(1.3, VehicleType::Mixed), VehicleType::Ltl);
        assert_eq!(tally.count(VehicleType::Ltl), 1);
    }

    #[test]
    fn test_tie_falls_back() {
        let mut prefs = LanePreferences::default();
        prefs.routes.vote(RouteLength::LongHaul);
        prefs.routes.vote(RouteLength::ShortHaul);
        assert_eq!(prefs.preferred_route(1.3), RouteLength::Mixed);
        assert_eq!(prefs.preferred_vehicle(1.3), VehicleType::Mixed);
        assert_eq!(prefs.preferred_region(1.3), Region::PanIndia);
    }

    #[test]
    fn test_competition_tolerance() {
        assert_eq!(competition_tolerance(5.0), Level::High);
        assert_eq!(competition_tolerance(3.5), Level::Medium);
        assert_eq!(competition_tolerance(2.99), Level::Low);
    }
}
