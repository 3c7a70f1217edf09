// ABOUTME: Client-facing project aggregation
// ABOUTME: Joins the lead -> proposal -> contract -> payment chain for display

use serde::Serialize;
use tracing::debug;

use groundwork_contracts::Contract;
use groundwork_leads::Lead;
use groundwork_payments::Payment;
use groundwork_proposals::Proposal;
use groundwork_storage::StorageError;

use crate::db::DbState;

/// Read-only view of one client's project, shaped for the tracking page.
/// Links that have not been reached yet are simply absent; only a missing
/// lead is an error.
#[derive(Debug, Serialize)]
pub struct ClientProjectView {
    pub lead: Lead,
    pub proposal: Option<Proposal>,
    pub contract: Option<Contract>,
    pub payments: Vec<Payment>,
}

impl DbState {
    pub async fn client_project(&self, lead_id: &str) -> Result<ClientProjectView, StorageError> {
        debug!("Aggregating client project for lead: {}", lead_id);

        let lead = self.lead_storage.get_lead(lead_id).await?;
        let proposal = self.proposal_storage.get_by_lead(lead_id).await?;

        let contract = match &proposal {
            Some(proposal) => self.contract_storage.find_by_proposal(&proposal.id).await?,
            None => None,
        };

        let payments = match &contract {
            Some(contract) => self.payment_storage.list_for_contract(&contract.id).await?,
            None => Vec::new(),
        };

        Ok(ClientProjectView {
            lead,
            proposal,
            contract,
            payments,
        })
    }
}
