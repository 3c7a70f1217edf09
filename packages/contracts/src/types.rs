// ABOUTME: Contract type definitions
// ABOUTME: Signature state machine types shared by client signing and finance review

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pending,
    Signed,
    Rejected,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Signed => "signed",
            ContractStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContractStatus::Pending),
            "signed" => Ok(ContractStatus::Signed),
            "rejected" => Ok(ContractStatus::Rejected),
            other => Err(format!("unknown contract status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureMethod {
    Digital,
    InPerson,
}

impl SignatureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::Digital => "digital",
            SignatureMethod::InPerson => "in_person",
        }
    }
}

impl FromStr for SignatureMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digital" => Ok(SignatureMethod::Digital),
            "in_person" => Ok(SignatureMethod::InPerson),
            other => Err(format!("unknown signature method: {}", other)),
        }
    }
}

/// Client action on a pending contract: sign one of two ways, or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractAction {
    Digital,
    InPerson,
    Rejected,
}

impl FromStr for ContractAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digital" => Ok(ContractAction::Digital),
            "in_person" => Ok(ContractAction::InPerson),
            "rejected" => Ok(ContractAction::Rejected),
            other => Err(format!("unknown contract action: {}", other)),
        }
    }
}

/// Finance review decision on a pending contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl FromStr for ReviewAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            other => Err(format!("unknown review action: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub proposal_id: String,
    pub contract_file_url: Option<String>,
    pub signature_method: Option<SignatureMethod>,
    pub status: ContractStatus,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
