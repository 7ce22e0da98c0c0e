//! Outbid response tracking.
//!
//! A response event occurs whenever a vendor's bid is immediately followed by
//! a lower bid from a different vendor on the same lane. The event succeeds if
//! the vendor bids on that lane again at any later point.

use statrs::statistics::Statistics;
use vendor_core::{BidEvent, VendorId};

/// Response events for one vendor, accumulated across lanes.
#[derive(Debug, Clone, Default)]
pub struct ResponseTally {
    events: u32,
    responded: u32,
    latencies_sec: Vec<f64>,
}

impl ResponseTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one lane's chronological bid stream.
    pub fn scan_lane(&mut self, stream: &[&BidEvent], vendor_id: &VendorId) {
        for (i, pair) in stream.windows(2).enumerate() {
            let (own, next) = (pair[0], pair[1]);
            if &own.vendor_id != vendor_id
                || &next.vendor_id == vendor_id
                || next.amount >= own.amount
            {
                continue;
            }
            self.events += 1;

            let reply = stream[i + 2..].iter().find(|b| &b.vendor_id == vendor_id);
            if let Some(reply) = reply {
                self.responded += 1;
                let latency_ms = (reply.timestamp - next.timestamp).num_milliseconds();
                self.latencies_sec.push(latency_ms as f64 / 1000.0);
            }
        }
    }

    pub fn events(&self) -> u32 {
        self.events
    }

    /// Share of outbid events the vendor answered, in percent.
    pub fn response_rate(&self) -> f64 {
        self.responded as f64 / self.events.max(1) as f64 * 100.0
    }

    /// Mean seconds from being outbid to re-bidding, or `sentinel` with no responses.
    pub fn avg_response_sec(&self, sentinel: f64) -> f64 {
        if self.latencies_sec.is_empty() {
            sentinel
        } else {
            self.latencies_sec.iter().mean()
        }
    }
}
