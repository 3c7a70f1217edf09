// ABOUTME: Lead type definitions
// ABOUTME: Structures for prospective client intake records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Converted => "converted",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "converted" => Ok(LeadStatus::Converted),
            other => Err(format!("unknown lead status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub client_name: String,
    pub contact_info: String,
    pub project_interest: String,
    pub budget: String,
    pub timeline: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a lead. Budget and timeline are free text exactly as
/// the client typed them; no numeric parsing happens at intake.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadCreateInput {
    pub client_name: String,
    pub contact_info: String,
    #[serde(default)]
    pub project_interest: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub timeline: String,
}
