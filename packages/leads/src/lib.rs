// ABOUTME: Lead intake library for Groundwork
// ABOUTME: Lead types and SQLite-backed storage

pub mod storage;
pub mod types;

#[cfg(test)]
mod storage_tests;

pub use storage::LeadStorage;
pub use types::{Lead, LeadCreateInput, LeadStatus};
