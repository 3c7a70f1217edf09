// ABOUTME: AI library for Groundwork
// ABOUTME: Estimation chat passthrough to the Anthropic Messages API

pub mod service;

pub use service::{AiServiceError, AiServiceResult, EstimateService};
