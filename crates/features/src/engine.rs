//! Per-vendor feature extraction.
//!
//! Combines the timing, pricing, response and preference components into a
//! flat feature set for every vendor with at least one bid.

use crate::{
    lane_classifier::{KeywordLaneClassifier, LaneClassifier},
    preferences::{competition_tolerance, LanePreferences},
    pricing::PriceTracker,
    response::ResponseTally,
    timing::{share_pct, TimingHistogram},
};
use chrono::{DateTime, Utc};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;
use vendor_core::{
    clamp_pct, AuctionId, BidEvent, Config, LaneId, Level, PreferenceConfig, Region,
    ResponseConfig, RouteLength, TimingConfig, VehicleType, VendorId,
};
use vendor_ledger::Corpus;

/// Reliability assumed for vendors the directory does not know.
pub const DEFAULT_RELIABILITY: f64 = 100.0;

/// Flat numeric features of one vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorFeatures {
    pub vendor_id: VendorId,
    pub company_name: String,
    pub reliability: f64,

    pub total_bids: u32,
    pub auctions_participated: u32,
    pub invited_auctions: u32,
    pub participation_rate: f64,
    pub lanes_bid: u32,
    pub lanes_won: u32,
    pub win_rate: f64,
    pub acceptance_rate: f64,
    pub last_bid_at: DateTime<Utc>,

    pub early_pct: f64,
    pub middle_pct: f64,
    pub late_pct: f64,
    pub extension_pct: f64,

    pub avg_discount: f64,
    pub price_floor_pct: f64,
    pub leading_bid_share: f64,
    pub avg_decrement: f64,
    pub value_min: f64,
    pub value_max: f64,

    pub response_rate: f64,
    pub avg_response_sec: f64,
    pub max_iterations: u32,

    pub preferred_route: RouteLength,
    pub preferred_region: Region,
    pub preferred_vehicle: VehicleType,
    pub avg_competitors: f64,
    pub competition_tolerance: Level,
}

/// Extracts `VendorFeatures` from a frozen corpus.
pub struct FeatureExtractor {
    timing: TimingConfig,
    preferences: PreferenceConfig,
    response: ResponseConfig,
    classifier: Box<dyn LaneClassifier>,
}

impl FeatureExtractor {
    /// Create an extractor using the keyword lane classifier.
    pub fn new(config: &Config) -> Self {
        let classifier = KeywordLaneClassifier::new(config.preferences.long_haul_km);
        Self::with_classifier(config, Box::new(classifier))
    }

    /// Create an extractor with a custom lane classifier.
    pub fn with_classifier(config: &Config, classifier: Box<dyn LaneClassifier>) -> Self {
        Self {
            timing: config.timing.clone(),
            preferences: config.preferences.clone(),
            response: config.response.clone(),
            classifier,
        }
    }

    /// Features for every vendor with at least one bid, in vendor id order.
    pub fn extract_all(&self, corpus: &Corpus) -> Vec<VendorFeatures> {
        let lane_streams = corpus.bids_by_lane();
        corpus
            .bids_by_vendor()
            .into_iter()
            .map(|(vendor_id, bids)| self.extract(vendor_id, &bids, corpus, &lane_streams))
            .collect()
    }

    /// Features for one vendor.
    ///
    /// `bids` must be the vendor's bids in chronological order and non-empty;
    /// `lane_streams` holds every lane's full chronological bid stream.
    pub fn extract(
        &self,
        vendor_id: &VendorId,
        bids: &[&BidEvent],
        corpus: &Corpus,
        lane_streams: &BTreeMap<&LaneId, Vec<&BidEvent>>,
    ) -> VendorFeatures {
        let mut timing = TimingHistogram::new();
        let mut pricing = PriceTracker::new();
        let mut responses = ResponseTally::new();
        let mut preferences = LanePreferences::default();
        let mut competitor_counts: Vec<f64> = Vec::new();
        let mut max_iterations = 0u32;
        let mut lanes_bid = 0u32;
        let mut lanes_won = 0u32;

        for bid in bids {
            pricing.record_amount(bid.amount);
        }

        let lane_ids: BTreeSet<&LaneId> = bids.iter().map(|b| &b.lane_id).collect();
        for lane_id in lane_ids {
            let (Some(lane), Some(stream)) = (corpus.lane(lane_id), lane_streams.get(lane_id))
            else {
                continue;
            };
            lanes_bid += 1;

            let mut lane_low: Option<f64> = None;
            let mut own_previous: Option<f64> = None;
            let mut iterations = 0u32;
            let mut rivals: HashSet<&VendorId> = HashSet::new();
            for event in stream {
                if &event.vendor_id == vendor_id {
                    timing.record(lane.position_of(event.timestamp), &self.timing);
                    pricing.record_lane_bid(lane.base_price, event.amount, lane_low, own_previous);
                    own_previous = Some(event.amount);
                    iterations += 1;
                } else {
                    rivals.insert(&event.vendor_id);
                }
                lane_low = Some(lane_low.map_or(event.amount, |low| low.min(event.amount)));
            }
            max_iterations = max_iterations.max(iterations);
            competitor_counts.push(rivals.len() as f64);
            responses.scan_lane(stream, vendor_id);

            let traits = self.classifier.classify_lane(&lane.lane_name);
            preferences.routes.vote(traits.route_length);
            preferences.regions.vote(traits.region);
            if traits.vehicle != VehicleType::Mixed {
                preferences.vehicles.vote(traits.vehicle);
            }

            if corpus.award(lane_id).is_some_and(|a| &a.vendor_id == vendor_id) {
                lanes_won += 1;
            }
        }

        let (auctions_participated, invited_auctions) = participation(vendor_id, bids, corpus);
        let avg_competitors = if competitor_counts.is_empty() {
            0.0
        } else {
            competitor_counts.iter().mean()
        };
        let (company_name, reliability) = match corpus.summary(vendor_id) {
            Some(summary) => (summary.company_name.clone(), clamp_pct(summary.reliability)),
            None => (vendor_id.to_string(), DEFAULT_RELIABILITY),
        };
        let ratio = self.preferences.dominance_ratio;

        let features = VendorFeatures {
            vendor_id: vendor_id.clone(),
            company_name,
            reliability,
            total_bids: bids.len() as u32,
            auctions_participated,
            invited_auctions,
            participation_rate: clamp_pct(share_pct(auctions_participated, invited_auctions)),
            lanes_bid,
            lanes_won,
            win_rate: clamp_pct(share_pct(lanes_won, lanes_bid)),
            acceptance_rate: acceptance_rate(vendor_id, corpus),
            last_bid_at: bids
                .iter()
                .map(|b| b.timestamp)
                .max()
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            early_pct: timing.early_pct(),
            middle_pct: timing.middle_pct(),
            late_pct: timing.late_pct(),
            extension_pct: timing.extension_pct(),
            avg_discount: pricing.avg_discount(),
            price_floor_pct: pricing.price_floor_pct(),
            leading_bid_share: pricing.leading_bid_share(),
            avg_decrement: pricing.avg_decrement(),
            value_min: pricing.min_amount(),
            value_max: pricing.max_amount(),
            response_rate: responses.response_rate(),
            avg_response_sec: responses.avg_response_sec(self.response.no_response_sentinel_sec),
            max_iterations,
            preferred_route: preferences.preferred_route(ratio),
            preferred_region: preferences.preferred_region(ratio),
            preferred_vehicle: preferences.preferred_vehicle(ratio),
            avg_competitors,
            competition_tolerance: competition_tolerance(avg_competitors),
        };

        debug!(
            vendor = %vendor_id,
            bids = features.total_bids,
            lanes = features.lanes_bid,
            participation = features.participation_rate,
            "vendor features extracted"
        );
        features
    }
}

/// `(auctions participated, invited auctions floored at 1)`.
fn participation(vendor_id: &VendorId, bids: &[&BidEvent], corpus: &Corpus) -> (u32, u32) {
    let participated: HashSet<&AuctionId> = bids.iter().map(|b| &b.auction_id).collect();
    let invited = corpus
        .auctions()
        .iter()
        .filter(|a| a.is_invited(vendor_id) || participated.contains(&a.auction_id))
        .count() as u32;
    (participated.len() as u32, invited.max(1))
}

/// Accepted share of the vendor's awards in completed auctions; 100 with no awards.
///
/// Auction membership comes from the awarded lane's own `auction_id`.
fn acceptance_rate(vendor_id: &VendorId, corpus: &Corpus) -> f64 {
    let completed: HashSet<&AuctionId> =
        corpus.completed_auctions().map(|a| &a.auction_id).collect();
    let mut total = 0u32;
    let mut accepted = 0u32;
    for award in corpus.awards().filter(|a| &a.vendor_id == vendor_id) {
        let in_completed = corpus
            .lane(&award.lane_id)
            .is_some_and(|lane| completed.contains(&lane.auction_id));
        if in_completed {
            total += 1;
            if award.is_accepted() {
                accepted += 1;
            }
        }
    }
    if total == 0 {
        100.0
    } else {
        share_pct(accepted, total)
    }
}
