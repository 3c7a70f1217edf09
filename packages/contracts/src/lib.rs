// ABOUTME: Contract library for Groundwork
// ABOUTME: Contract types and the SQLite-backed signing state machine

pub mod storage;
pub mod types;


pub use storage::ContractStorage;
pub use types::{Contract, ContractAction, ContractStatus, ReviewAction, SignatureMethod};
