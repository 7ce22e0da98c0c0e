//! Frozen snapshot of the ledger.
//!
//! The engine reads the ledger exactly once per invocation and computes over
//! the resulting `Corpus`, so nothing written to the ledger mid-computation is
//! observed.

use crate::accessor::LedgerAccessor;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};
use vendor_core::{
    Auction, AuctionStatus, Award, BidEvent, Error, Lane, LaneId, Result, VendorId, VendorSummary,
};

/// Auction states the engine analyzes.
pub const HISTORICAL_STATUSES: [AuctionStatus; 2] =
    [AuctionStatus::Completed, AuctionStatus::Active];

/// Immutable, fully materialized read of the ledger.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    auctions: Vec<Auction>,
    /// Chronological; ties keep ledger order.
    bids: Vec<BidEvent>,
    lanes: HashMap<LaneId, Lane>,
    awards: HashMap<LaneId, Award>,
    summaries: HashMap<VendorId, VendorSummary>,
}

impl Corpus {
    /// Read completed and active auctions with everything they reference.
    ///
    /// Lanes, awards and vendor summaries the ledger cannot resolve are left
    /// out; only an accessor failure is an error.
    pub fn load<L: LedgerAccessor + ?Sized>(ledger: &L) -> Result<Self> {
        let auctions = ledger.list_auctions(&HISTORICAL_STATUSES)?;

        let mut bids = Vec::new();
        for auction in &auctions {
            bids.extend(ledger.list_bids_for_auction(&auction.auction_id)?);
        }
        if let Some(bad) = bids.iter().find(|b| !b.amount.is_finite() || b.amount < 0.0) {
            return Err(Error::data(format!(
                "bid by {} on lane {} has invalid amount {}",
                bad.vendor_id, bad.lane_id, bad.amount
            )));
        }
        bids.sort_by_key(|b| b.timestamp);

        let mut lane_ids: BTreeSet<LaneId> = auctions
            .iter()
            .flat_map(|a| a.lane_ids.iter().cloned())
            .collect();
        lane_ids.extend(bids.iter().map(|b| b.lane_id.clone()));

        let mut lanes = HashMap::with_capacity(lane_ids.len());
        let mut awards = HashMap::new();
        for lane_id in lane_ids {
            if let Some(lane) = ledger.get_lane(&lane_id)? {
                lanes.insert(lane_id.clone(), lane);
            }
            if let Some(award) = ledger.get_award(&lane_id)? {
                awards.insert(lane_id, award);
            }
        }

        if let Some(bad) = lanes
            .values()
            .find(|l| !l.base_price.is_finite() || l.base_price < 0.0)
        {
            return Err(Error::data(format!(
                "lane {} has invalid base price {}",
                bad.lane_id, bad.base_price
            )));
        }

        let orphaned = bids.iter().filter(|b| !lanes.contains_key(&b.lane_id)).count();
        if orphaned > 0 {
            warn!(orphaned, "bids reference unknown lanes; excluded from lane features");
        }

        let bidders: BTreeSet<&VendorId> = bids.iter().map(|b| &b.vendor_id).collect();
        let mut summaries = HashMap::with_capacity(bidders.len());
        for vendor_id in bidders {
            if let Some(summary) = ledger.get_vendor_summary(vendor_id)? {
                summaries.insert(vendor_id.clone(), summary);
            }
        }

        debug!(
            auctions = auctions.len(),
            bids = bids.len(),
            lanes = lanes.len(),
            awards = awards.len(),
            "ledger corpus loaded"
        );

        Ok(Self {
            auctions,
            bids,
            lanes,
            awards,
            summaries,
        })
    }

    /// Completed and active auctions.
    pub fn auctions(&self) -> &[Auction] {
        &self.auctions
    }

    /// All bids in chronological order.
    pub fn bids(&self) -> &[BidEvent] {
        &self.bids
    }

    pub fn lane(&self, lane_id: &LaneId) -> Option<&Lane> {
        self.lanes.get(lane_id)
    }

    pub fn award(&self, lane_id: &LaneId) -> Option<&Award> {
        self.awards.get(lane_id)
    }

    /// Every resolved award, in no particular order.
    pub fn awards(&self) -> impl Iterator<Item = &Award> {
        self.awards.values()
    }

    pub fn summary(&self, vendor_id: &VendorId) -> Option<&VendorSummary> {
        self.summaries.get(vendor_id)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub fn completed_auctions(&self) -> impl Iterator<Item = &Auction> {
        self.auctions
            .iter()
            .filter(|a| a.status == AuctionStatus::Completed)
    }

    pub fn completed_auction_count(&self) -> usize {
        self.completed_auctions().count()
    }

    /// Each bidding vendor's bids, chronological, keyed in id order.
    pub fn bids_by_vendor(&self) -> BTreeMap<&VendorId, Vec<&BidEvent>> {
        let mut grouped: BTreeMap<&VendorId, Vec<&BidEvent>> = BTreeMap::new();
        for bid in &self.bids {
            grouped.entry(&bid.vendor_id).or_default().push(bid);
        }
        grouped
    }

    /// Each lane's full bid stream, chronological, keyed in id order.
    pub fn bids_by_lane(&self) -> BTreeMap<&LaneId, Vec<&BidEvent>> {
        let mut grouped: BTreeMap<&LaneId, Vec<&BidEvent>> = BTreeMap::new();
        for bid in &self.bids {
            grouped.entry(&bid.lane_id).or_default().push(bid);
        }
        grouped
    }
}
