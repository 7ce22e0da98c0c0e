//! Vendor behavior analytics.
//!
//! This crate handles:
//! - Rule-chain classification of timing, aggressiveness, segment, persistence and dropout risk
//! - Predictive participation, win-rate and bid-range scores
//! - Vendor co-participation clustering
//! - Coverage gap assessment
//! - Snapshot assembly and the top-level engine

pub mod classifier;
pub mod clustering;
pub mod coverage;
pub mod engine;
pub mod report;
pub mod scorer;

pub use classifier::{Classification, Signals, VendorClassifier};
pub use clustering::CoParticipation;
pub use coverage::{CoverageModel, StaticCoverageModel};
pub use engine::{compute_vendor_behavior_analytics, VendorBehaviorEngine};
pub use report::ReportAssembler;
pub use scorer::{Forecast, PredictiveScorer};
