//! Ledger accessor interface.

use vendor_core::{
    Auction, AuctionId, AuctionStatus, Award, BidEvent, Lane, LaneId, Result, VendorId,
    VendorSummary,
};

/// Read-only view over auctions, lanes, bids and awards.
///
/// Lookups for records that do not exist return `Ok(None)`; `Err` is reserved
/// for the accessor itself failing.
pub trait LedgerAccessor {
    /// List auctions whose status is in `statuses`. An empty slice lists all.
    fn list_auctions(&self, statuses: &[AuctionStatus]) -> Result<Vec<Auction>>;

    /// All bids placed in an auction, in any order.
    fn list_bids_for_auction(&self, auction_id: &AuctionId) -> Result<Vec<BidEvent>>;

    fn get_lane(&self, lane_id: &LaneId) -> Result<Option<Lane>>;

    fn get_award(&self, lane_id: &LaneId) -> Result<Option<Award>>;

    fn get_vendor_summary(&self, vendor_id: &VendorId) -> Result<Option<VendorSummary>>;
}

impl<T: LedgerAccessor + ?Sized> LedgerAccessor for &T {
    fn list_auctions(&self, statuses: &[AuctionStatus]) -> Result<Vec<Auction>> {
        (**self).list_auctions(statuses)
    }

    fn list_bids_for_auction(&self, auction_id: &AuctionId) -> Result<Vec<BidEvent>> {
        (**self).list_bids_for_auction(auction_id)
    }

    fn get_lane(&self, lane_id: &LaneId) -> Result<Option<Lane>> {
        (**self).get_lane(lane_id)
    }

    fn get_award(&self, lane_id: &LaneId) -> Result<Option<Award>> {
        (**self).get_award(lane_id)
    }

    fn get_vendor_summary(&self, vendor_id: &VendorId) -> Result<Option<VendorSummary>> {
        (**self).get_vendor_summary(vendor_id)
    }
}
