// ABOUTME: Proposal storage layer using SQLite
// ABOUTME: Read paths for the sales list and the token-resolved response page

use sqlx::{Row, SqlitePool};
use tracing::debug;

use groundwork_storage::StorageError;

use crate::types::Proposal;

pub struct ProposalStorage {
    pool: SqlitePool,
}

impl ProposalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_proposals(&self) -> Result<Vec<Proposal>, StorageError> {
        debug!("Listing proposals");

        let rows = sqlx::query("SELECT * FROM proposals ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_proposal).collect()
    }

    pub async fn get_proposal(&self, proposal_id: &str) -> Result<Proposal, StorageError> {
        debug!("Fetching proposal: {}", proposal_id);

        let row = sqlx::query("SELECT * FROM proposals WHERE id = ?")
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_proposal(&row)
    }

    /// Resolves the response page. Returned whatever its status so the page
    /// can render an already-decided notice instead of a dead link.
    pub async fn get_by_token(&self, token: &str) -> Result<Proposal, StorageError> {
        debug!("Fetching proposal by response token");

        let row = sqlx::query("SELECT * FROM proposals WHERE response_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_proposal(&row)
    }

    pub async fn get_by_lead(&self, lead_id: &str) -> Result<Option<Proposal>, StorageError> {
        debug!("Fetching proposal for lead: {}", lead_id);

        let row = sqlx::query("SELECT * FROM proposals WHERE lead_id = ?")
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_proposal).transpose()
    }
}

pub fn row_to_proposal(row: &sqlx::sqlite::SqliteRow) -> Result<Proposal, StorageError> {
    let status: String = row.try_get("status")?;
    let scope_json: String = row.try_get("scope_of_work")?;

    Ok(Proposal {
        id: row.try_get("id")?,
        lead_id: row.try_get("lead_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        budget_estimate: row.try_get("budget_estimate")?,
        timeline_estimate: row.try_get("timeline_estimate")?,
        payment_terms: row.try_get("payment_terms")?,
        scope_of_work: serde_json::from_str(&scope_json)?,
        file_url: row.try_get("file_url")?,
        response_token: row.try_get("response_token")?,
        status: status.parse().map_err(StorageError::Database)?,
        responded_at: row.try_get("responded_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
