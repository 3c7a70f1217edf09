// ABOUTME: Core library for Groundwork shared constants
// ABOUTME: Re-exports directory and database location helpers

pub mod constants;

pub use constants::{database_path, groundwork_dir};
