//! Feature extraction for the vendor analytics engine.
//!
//! This crate handles:
//! - Bid timing distribution within lane durations
//! - Discount, leading-bid and decrement statistics
//! - Outbid response tracking
//! - Lane preference voting over lane-name heuristics
//! - Recent-vs-prior activity trend

pub mod engine;
pub mod lane_classifier;
pub mod preferences;
pub mod pricing;
pub mod response;
pub mod timing;
pub mod trend;

pub use engine::{FeatureExtractor, VendorFeatures};
pub use lane_classifier::{KeywordLaneClassifier, LaneClassifier};
pub use trend::{TrendAnalyzer, TrendReading};
