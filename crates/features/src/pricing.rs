//! Price behavior relative to lane base prices.

/// Running discount, leading-bid and decrement statistics for one vendor.
#[derive(Debug, Clone, Default)]
pub struct PriceTracker {
    priced_bids: u32,
    discount_sum: f64,
    max_discount: Option<f64>,
    leading_bids: u32,
    decrement_sum: f64,
    decrement_count: u32,
    min_amount: Option<f64>,
    max_amount: Option<f64>,
}

impl PriceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discount of a bid against a base price, in percent.
    #[inline]
    pub fn discount_pct(base_price: f64, amount: f64) -> f64 {
        (base_price - amount) / base_price.max(1.0) * 100.0
    }

    /// Record the amount of any bid, whether or not its lane is known.
    pub fn record_amount(&mut self, amount: f64) {
        self.min_amount = Some(self.min_amount.map_or(amount, |m| m.min(amount)));
        self.max_amount = Some(self.max_amount.map_or(amount, |m| m.max(amount)));
    }

    /// Record a bid on a known lane.
    ///
    /// `lane_low` is the lowest amount any vendor had bid on the lane before
    /// this bid; `own_previous` is this vendor's previous bid on the lane.
    pub fn record_lane_bid(
        &mut self,
        base_price: f64,
        amount: f64,
        lane_low: Option<f64>,
        own_previous: Option<f64>,
    ) {
        let discount = Self::discount_pct(base_price, amount);
        self.priced_bids += 1;
        self.discount_sum += discount;
        self.max_discount = Some(self.max_discount.map_or(discount, |m| m.max(discount)));

        if lane_low.map_or(true, |low| amount < low) {
            self.leading_bids += 1;
        }

        if let Some(previous) = own_previous {
            let decrement = previous - amount;
            if decrement >= 0.0 {
                self.decrement_sum += decrement;
                self.decrement_count += 1;
            }
        }
    }

    pub fn avg_discount(&self) -> f64 {
        self.discount_sum / self.priced_bids.max(1) as f64
    }

    /// Deepest discount offered, in percent.
    pub fn price_floor_pct(&self) -> f64 {
        self.max_discount.unwrap_or(0.0)
    }

    pub fn leading_bid_share(&self) -> f64 {
        self.leading_bids as f64 / self.priced_bids.max(1) as f64 * 100.0
    }

    pub fn avg_decrement(&self) -> f64 {
        self.decrement_sum / self.decrement_count.max(1) as f64
    }

    pub fn min_amount(&self) -> f64 {
        self.min_amount.unwrap_or(0.0)
    }

    pub fn max_amount(&self) -> f64 {
        self.max_amount.unwrap_or(0.0)
    }
}
