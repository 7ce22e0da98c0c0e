//! In-memory ledger adapter.

use crate::accessor::LedgerAccessor;
use std::collections::HashMap;
use vendor_core::{
    Auction, AuctionId, AuctionStatus, Award, BidEvent, Lane, LaneId, Result, VendorId,
    VendorSummary,
};

/// Ledger backed by plain collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    auctions: Vec<Auction>,
    bids: Vec<BidEvent>,
    lanes: HashMap<LaneId, Lane>,
    awards: HashMap<LaneId, Award>,
    vendors: HashMap<VendorId, VendorSummary>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_auction(&mut self, auction: Auction) -> &mut Self {
        self.auctions.push(auction);
        self
    }

    /// Add a lane. The lane is also attached to its auction if that auction
    /// is already registered and does not list it yet.
    pub fn add_lane(&mut self, lane: Lane) -> &mut Self {
        if let Some(auction) = self
            .auctions
            .iter_mut()
            .find(|a| a.auction_id == lane.auction_id)
        {
            if !auction.lane_ids.contains(&lane.lane_id) {
                auction.lane_ids.push(lane.lane_id.clone());
            }
        }
        self.lanes.insert(lane.lane_id.clone(), lane);
        self
    }

    pub fn add_bid(&mut self, bid: BidEvent) -> &mut Self {
        self.bids.push(bid);
        self
    }

    /// Record an award. A later award for the same lane replaces the earlier one.
    pub fn add_award(&mut self, award: Award) -> &mut Self {
        self.awards.insert(award.lane_id.clone(), award);
        self
    }

    pub fn add_vendor(&mut self, vendor_id: VendorId, summary: VendorSummary) -> &mut Self {
        self.vendors.insert(vendor_id, summary);
        self
    }

    /// Number of stored bids.
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }
}

impl LedgerAccessor for InMemoryLedger {
    fn list_auctions(&self, statuses: &[AuctionStatus]) -> Result<Vec<Auction>> {
        Ok(self
            .auctions
            .iter()
            .filter(|a| statuses.is_empty() || statuses.contains(&a.status))
            .cloned()
            .collect())
    }

    fn list_bids_for_auction(&self, auction_id: &AuctionId) -> Result<Vec<BidEvent>> {
        Ok(self
            .bids
            .iter()
            .filter(|b| &b.auction_id == auction_id)
            .cloned()
            .collect())
    }

    fn get_lane(&self, lane_id: &LaneId) -> Result<Option<Lane>> {
        Ok(self.lanes.get(lane_id).cloned())
    }

    fn get_award(&self, lane_id: &LaneId) -> Result<Option<Award>> {
        Ok(self.awards.get(lane_id).cloned())
    }

    fn get_vendor_summary(&self, vendor_id: &VendorId) -> Result<Option<VendorSummary>> {
        Ok(self.vendors.get(vendor_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn make_auction(id: &str, status: AuctionStatus) -> Auction {
        Auction {
            auction_id: id.into(),
            name: format!("Auction {id}"),
            status,
            lane_ids: vec![],
            invited_vendors: vec![],
        }
    }

    fn make_lane(id: &str, auction: &str) -> Lane {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Lane {
            lane_id: id.into(),
            auction_id: auction.into(),
            lane_name: "Delhi - Jaipur FTL".to_string(),
            base_price: 40_000.0,
            start_time: start,
            end_time: start + Duration::hours(2),
        }
    }

    #[test]
    fn test_status_filter() {
        let mut ledger = InMemoryLedger::new();
        ledger
            .add_auction(make_auction("A1", AuctionStatus::Completed))
            .add_auction(make_auction("A2", AuctionStatus::Draft))
            .add_auction(make_auction("A3", AuctionStatus::Active));

        let historical = ledger
            .list_auctions(&[AuctionStatus::Completed, AuctionStatus::Active])
            .unwrap();
        assert_eq!(historical.len(), 2);
        assert_eq!(ledger.list_auctions(&[]).unwrap().len(), 3);
    }

    #[test]
    fn test_add_lane_attaches_to_auction() {
        let mut ledger = InMemoryLedger::new();
        ledger
            .add_auction(make_auction("A1", AuctionStatus::Completed))
            .add_lane(make_lane("L1", "A1"))
            .add_lane(make_lane("L1", "A1"));

        let auctions = ledger.list_auctions(&[]).unwrap();
        assert_eq!(auctions[0].lane_ids, vec![LaneId::from("L1")]);
        assert!(ledger.get_lane(&"L1".into()).unwrap().is_some());
        assert!(ledger.get_lane(&"L2".into()).unwrap().is_none());
    }

    #[test]
    fn test_bids_scoped_to_auction() {
        let mut ledger = InMemoryLedger::new();
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        for (vendor, auction) in [("V1", "A1"), ("V2", "A1"), ("V1", "A2")] {
            ledger.add_bid(BidEvent {
                vendor_id: vendor.into(),
                lane_id: "L1".into(),
                auction_id: auction.into(),
                amount: 39_000.0,
                timestamp: ts,
            });
        }
        assert_eq!(ledger.list_bids_for_auction(&"A1".into()).unwrap().len(), 2);
        assert_eq!(ledger.bid_count(), 3);
    }
}
