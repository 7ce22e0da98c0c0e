//! Vendor clustering by lane co-participation.
//!
//! Two vendors are linked once for every lane both bid on. Intensity
//! normalizes the shared-lane count by the number of completed auctions.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use vendor_core::{clamp_pct, VendorCluster, VendorId};
use vendor_ledger::Corpus;

/// Shared-lane counts for every unordered vendor pair.
#[derive(Debug, Clone, Default)]
pub struct CoParticipation {
    /// Keyed by `(smaller id, larger id)`.
    pairs: BTreeMap<(VendorId, VendorId), u32>,
    completed_auctions: usize,
}

impl CoParticipation {
    /// Count co-bidding pairs on every lane the ledger can resolve.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut pairs: BTreeMap<(VendorId, VendorId), u32> = BTreeMap::new();
        for (lane_id, stream) in corpus.bids_by_lane() {
            if corpus.lane(lane_id).is_none() {
                continue;
            }
            let vendors: Vec<&VendorId> = stream
                .iter()
                .map(|b| &b.vendor_id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            for (i, a) in vendors.iter().enumerate() {
                for b in &vendors[i + 1..] {
                    *pairs.entry(((*a).clone(), (*b).clone())).or_insert(0) += 1;
                }
            }
        }
        Self {
            pairs,
            completed_auctions: corpus.completed_auction_count(),
        }
    }

    fn key(a: &VendorId, b: &VendorId) -> (VendorId, VendorId) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn shared_lanes(&self, a: &VendorId, b: &VendorId) -> u32 {
        self.pairs.get(&Self::key(a, b)).copied().unwrap_or(0)
    }

    fn intensity_of(&self, shared_lanes: u32) -> f64 {
        clamp_pct(shared_lanes as f64 / self.completed_auctions.max(1) as f64 * 100.0)
    }

    /// Intensity of a pair in either order, or `None` if they never shared a lane.
    pub fn intensity(&self, a: &VendorId, b: &VendorId) -> Option<f64> {
        self.pairs
            .get(&Self::key(a, b))
            .map(|count| self.intensity_of(*count))
    }

    /// The `n` most intense pairs, descending.
    ///
    /// Ties break on shared lanes, then on vendor ids.
    pub fn top(&self, n: usize, corpus: &Corpus) -> Vec<VendorCluster> {
        let company = |id: &VendorId| {
            corpus
                .summary(id)
                .map_or_else(|| id.to_string(), |s| s.company_name.clone())
        };

        let mut ranked: Vec<(&(VendorId, VendorId), u32, f64)> = self
            .pairs
            .iter()
            .map(|(pair, count)| (pair, *count, self.intensity_of(*count)))
            .collect();
        // BTreeMap iteration already orders by ids; the sort is stable.
        ranked.sort_by_key(|(_, count, intensity)| {
            (Reverse(OrderedFloat(*intensity)), Reverse(*count))
        });

        ranked
            .into_iter()
            .take(n)
            .map(|((a, b), count, intensity)| VendorCluster {
                vendor_a: a.clone(),
                vendor_b: b.clone(),
                company_a: company(a),
                company_b: company(b),
                shared_lanes: count,
                intensity,
            })
            .collect()
    }
}
