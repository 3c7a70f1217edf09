// ABOUTME: Proposal type definitions
// ABOUTME: Structures for sales proposals and the client response decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            other => Err(format!("unknown proposal status: {}", other)),
        }
    }
}

/// The client's decision on a proposal. Distinct from `ProposalStatus`
/// because `pending` is never a valid decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalDecision {
    Approved,
    Rejected,
}

impl ProposalDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalDecision::Approved => "approved",
            ProposalDecision::Rejected => "rejected",
        }
    }
}

impl FromStr for ProposalDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ProposalDecision::Approved),
            "rejected" => Ok(ProposalDecision::Rejected),
            other => Err(format!("unknown proposal decision: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub lead_id: String,
    pub title: String,
    pub description: String,
    pub budget_estimate: f64,
    pub timeline_estimate: String,
    pub payment_terms: String,
    pub scope_of_work: Vec<String>,
    pub file_url: Option<String>,
    pub response_token: String,
    pub status: ProposalStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalCreateInput {
    pub lead_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub budget_estimate: f64,
    #[serde(default)]
    pub timeline_estimate: String,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub scope_of_work: Vec<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}
