//! Read-only access to the auction ledger.
//!
//! This crate handles:
//! - The `LedgerAccessor` interface owned by the auction subsystem
//! - An in-memory adapter for tests and demos
//! - Freezing the ledger into an immutable `Corpus` before computation

pub mod accessor;
pub mod corpus;
pub mod memory;

pub use accessor::LedgerAccessor;
pub use corpus::Corpus;
pub use memory::InMemoryLedger;
