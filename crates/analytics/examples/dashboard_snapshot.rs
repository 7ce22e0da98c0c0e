//! Builds a small in-memory ledger and prints the analytics snapshot as JSON.
//!
//! Run with `RUST_LOG=debug cargo run --example dashboard_snapshot` to see
//! per-vendor extraction logs.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;
use vendor_analytics::VendorBehaviorEngine;
use vendor_core::{
    Auction, AuctionStatus, Award, AwardStatus, BidEvent, Config, Lane, VendorId, VendorSummary,
};
use vendor_ledger::InMemoryLedger;

const LANES: &[(&str, &str, &str, i64)] = &[
    ("L-101", "AUC-1", "Mumbai - Pune FTL 32ft", 150),
    ("L-102", "AUC-1", "Delhi - Chennai 2,200 km container", 150),
    ("L-201", "AUC-2", "Kolkata - Patna PTL", 45),
    ("L-202", "AUC-2", "Bangalore - Hyderabad express", 45),
    ("L-301", "AUC-3", "Ahmedabad - Surat local", 2),
];

const VENDORS: &[(&str, &str, f64)] = &[
    ("V-ROADLINK", "Roadlink Logistics", 94.0),
    ("V-SWIFT", "Swift Carriers", 81.0),
    ("V-GATI", "Gati Movers", 72.0),
    ("V-NORTH", "Northern Freight Co", 88.0),
];

fn seed_ledger() -> InMemoryLedger {
    let now = Utc::now();
    let mut ledger = InMemoryLedger::new();

    for (id, name, status, invited) in [
        ("AUC-1", "Q2 Primary Lanes", AuctionStatus::Completed, vec![]),
        ("AUC-2", "Q3 East and South", AuctionStatus::Completed, vec![]),
        (
            "AUC-3",
            "Gujarat Spot",
            AuctionStatus::Active,
            vec!["V-ROADLINK", "V-SWIFT"],
        ),
    ] {
        ledger.add_auction(Auction {
            auction_id: id.into(),
            name: name.to_string(),
            status,
            lane_ids: vec![],
            invited_vendors: invited.into_iter().map(VendorId::from).collect(),
        });
    }

    for (vendor, company, reliability) in VENDORS {
        ledger.add_vendor(
            VendorId::from(*vendor),
            VendorSummary {
                company_name: company.to_string(),
                reliability: *reliability,
            },
        );
    }

    for (lane_id, auction_id, name, days_ago) in LANES {
        let start = now - Duration::days(*days_ago);
        ledger.add_lane(Lane {
            lane_id: (*lane_id).into(),
            auction_id: (*auction_id).into(),
            lane_name: name.to_string(),
            base_price: 80_000.0,
            start_time: start,
            end_time: start + Duration::hours(2),
        });

        // Minutes into a 120-minute lane and the discount off base.
        let script: &[(&str, i64, f64)] = &[
            ("V-ROADLINK", 8, 0.08),
            ("V-SWIFT", 55, 0.12),
            ("V-ROADLINK", 61, 0.15),
            ("V-GATI", 112, 0.19),
            ("V-NORTH", 70, 0.11),
        ];
        for (vendor, minute, discount) in script {
            if *vendor == "V-NORTH" && !name.contains("Delhi") {
                continue;
            }
            ledger.add_bid(BidEvent {
                vendor_id: (*vendor).into(),
                lane_id: (*lane_id).into(),
                auction_id: (*auction_id).into(),
                amount: (80_000.0 * (1.0 - discount)).round(),
                timestamp: start + Duration::minutes(*minute),
            });
        }
    }

    for (lane_id, vendor, status) in [
        ("L-101", "V-GATI", AwardStatus::Accepted),
        ("L-102", "V-GATI", AwardStatus::Rejected),
        ("L-201", "V-GATI", AwardStatus::Accepted),
        ("L-202", "V-ROADLINK", AwardStatus::Accepted),
    ] {
        ledger.add_award(Award {
            lane_id: lane_id.into(),
            vendor_id: vendor.into(),
            status,
        });
    }
    ledger
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let ledger = seed_ledger();
    let engine = VendorBehaviorEngine::new(&ledger, Config::default());
    let snapshot = engine.compute()?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
