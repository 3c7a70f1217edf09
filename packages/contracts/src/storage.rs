// ABOUTME: Contract storage layer using SQLite
// ABOUTME: Conditional-update state machine for signing and finance review

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use groundwork_storage::StorageError;

use crate::types::{Contract, ContractAction, ContractStatus, ReviewAction, SignatureMethod};

pub struct ContractStorage {
    pub(crate) pool: SqlitePool,
}

impl ContractStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_contract(&self, contract_id: &str) -> Result<Contract, StorageError> {
        debug!("Fetching contract: {}", contract_id);

        let row = sqlx::query("SELECT * FROM contracts WHERE id = ?")
            .bind(contract_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_contract(&row)
    }

    pub async fn get_by_proposal(&self, proposal_id: &str) -> Result<Contract, StorageError> {
        debug!("Fetching contract for proposal: {}", proposal_id);

        let row = sqlx::query("SELECT * FROM contracts WHERE proposal_id = ?")
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_contract(&row)
    }

    pub async fn find_by_proposal(
        &self,
        proposal_id: &str,
    ) -> Result<Option<Contract>, StorageError> {
        let row = sqlx::query("SELECT * FROM contracts WHERE proposal_id = ?")
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_contract).transpose()
    }

    /// Attaches the externally stored document reference. Only allowed while
    /// the contract is still pending.
    pub async fn set_document(
        &self,
        proposal_id: &str,
        contract_file_url: &str,
    ) -> Result<Contract, StorageError> {
        debug!("Attaching document to contract for proposal: {}", proposal_id);

        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET contract_file_url = ?, updated_at = ?
            WHERE proposal_id = ? AND status = 'pending'
            "#,
        )
        .bind(contract_file_url)
        .bind(Utc::now())
        .bind(proposal_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            let existing = self.get_by_proposal(proposal_id).await?;
            return Err(terminal_conflict(existing.status));
        }

        self.get_by_proposal(proposal_id).await
    }

    /// Client response on a pending contract. A single conditional update
    /// enforces that pending is the only state the machine moves out of.
    pub async fn respond(
        &self,
        proposal_id: &str,
        action: ContractAction,
    ) -> Result<Contract, StorageError> {
        debug!("Responding to contract for proposal: {}", proposal_id);

        let now = Utc::now();
        let result = match action {
            ContractAction::Digital | ContractAction::InPerson => {
                let method = match action {
                    ContractAction::Digital => SignatureMethod::Digital,
                    _ => SignatureMethod::InPerson,
                };
                sqlx::query(
                    r#"
                    UPDATE contracts
                    SET status = 'signed', signature_method = ?, signed_at = ?, updated_at = ?
                    WHERE proposal_id = ? AND status = 'pending'
                    "#,
                )
                .bind(method.as_str())
                .bind(now)
                .bind(now)
                .bind(proposal_id)
                .execute(&self.pool)
                .await
            }
            ContractAction::Rejected => {
                sqlx::query(
                    r#"
                    UPDATE contracts
                    SET status = 'rejected', signature_method = NULL, updated_at = ?
                    WHERE proposal_id = ? AND status = 'pending'
                    "#,
                )
                .bind(now)
                .bind(proposal_id)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            let existing = self.get_by_proposal(proposal_id).await?;
            return Err(terminal_conflict(existing.status));
        }

        self.get_by_proposal(proposal_id).await
    }

    /// The finance review queue is exactly the set of pending contracts.
    pub async fn list_pending(&self) -> Result<Vec<Contract>, StorageError> {
        debug!("Listing pending contracts");

        let rows =
            sqlx::query("SELECT * FROM contracts WHERE status = 'pending' ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_contract).collect()
    }

    /// Finance review drives the same state machine as client signing:
    /// approve -> signed (signature_method untouched), reject -> rejected.
    /// A failed or refused action leaves the row pending and still queued.
    pub async fn review(
        &self,
        contract_id: &str,
        action: ReviewAction,
    ) -> Result<Contract, StorageError> {
        debug!("Finance review on contract: {}", contract_id);

        let now = Utc::now();
        let (target, signed_at) = match action {
            ReviewAction::Approve => (ContractStatus::Signed, Some(now)),
            ReviewAction::Reject => (ContractStatus::Rejected, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET status = ?, signed_at = COALESCE(signed_at, ?), updated_at = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(target.as_str())
        .bind(signed_at)
        .bind(now)
        .bind(contract_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            let existing = self.get_contract(contract_id).await?;
            return Err(terminal_conflict(existing.status));
        }

        self.get_contract(contract_id).await
    }
}

fn terminal_conflict(status: ContractStatus) -> StorageError {
    StorageError::Conflict(format!("contract already {}", status))
}

pub fn row_to_contract(row: &sqlx::sqlite::SqliteRow) -> Result<Contract, StorageError> {
    let status: String = row.try_get("status")?;
    let signature_method: Option<String> = row.try_get("signature_method")?;

    Ok(Contract {
        id: row.try_get("id")?,
        proposal_id: row.try_get("proposal_id")?,
        contract_file_url: row.try_get("contract_file_url")?,
        signature_method: signature_method
            .map(|m| m.parse())
            .transpose()
            .map_err(StorageError::Database)?,
        status: status.parse().map_err(StorageError::Database)?,
        signed_at: row.try_get("signed_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
