// ABOUTME: Workflow orchestration library for Groundwork
// ABOUTME: Shared DbState plus the cross-entity lifecycle transactions

pub mod client_project;
pub mod db;
pub mod workflow;

pub use client_project::ClientProjectView;
pub use db::DbState;
pub use workflow::{ProposalResponseOutcome, WorkflowStorage};
