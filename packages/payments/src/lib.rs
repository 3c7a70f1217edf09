// ABOUTME: Payment library for Groundwork
// ABOUTME: Payment types and SQLite-backed schedule storage

pub mod storage;
pub mod types;


pub use storage::PaymentStorage;
pub use types::{InstallmentInput, Payment, PaymentStatus};
