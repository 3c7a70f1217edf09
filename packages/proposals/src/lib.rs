// ABOUTME: Proposal library for Groundwork
// ABOUTME: Proposal types and SQLite-backed storage

pub mod storage;
pub mod types;


pub use storage::ProposalStorage;
pub use types::{Proposal, ProposalCreateInput, ProposalDecision, ProposalStatus};
