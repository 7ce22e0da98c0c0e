//! Core types and configuration for the vendor analytics engine.
//!
//! This crate provides shared types used across all other crates:
//! - Ledger records (auctions, lanes, bids, awards)
//! - Classification labels
//! - Derived profiles and the analytics snapshot
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod profile;
pub mod types;

pub use config::{
    ClusteringConfig, Config, ParticipationConfig, PreferenceConfig, ResponseConfig, TimingConfig,
    TrendConfig,
};
pub use error::{Error, Result};
pub use profile::*;
pub use types::*;
