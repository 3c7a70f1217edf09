// ABOUTME: Cross-entity workflow transactions for the proposal lifecycle
// ABOUTME: Lead conversion, token-gated proposal decisions, schedule creation

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use groundwork_contracts::storage::row_to_contract;
use groundwork_contracts::{Contract, ContractStatus};
use groundwork_payments::storage::row_to_payment;
use groundwork_payments::{InstallmentInput, Payment, PaymentStatus};
use groundwork_proposals::storage::row_to_proposal;
use groundwork_proposals::{Proposal, ProposalCreateInput, ProposalDecision, ProposalStatus};
use groundwork_storage::{ids, StorageError};

/// Outcome of a proposal decision. Approval creates the successor contract
/// in the same transaction.
#[derive(Debug, Serialize)]
pub struct ProposalResponseOutcome {
    pub proposal: Proposal,
    pub contract: Option<Contract>,
}

/// Multi-entity transitions that must hold across tables. Single-entity
/// reads and updates live in the per-entity storages; everything here runs
/// inside one SQLite transaction.
pub struct WorkflowStorage {
    pool: SqlitePool,
}

impl WorkflowStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Converts a lead into a proposal. The conversion is the conditional
    /// update: a lead that is already converted refuses a second proposal.
    pub async fn create_proposal(
        &self,
        input: ProposalCreateInput,
    ) -> Result<Proposal, StorageError> {
        if input.title.trim().is_empty() {
            return Err(StorageError::Validation("title is required".to_string()));
        }
        if input.budget_estimate < 0.0 {
            return Err(StorageError::Validation(
                "budget_estimate must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let converted = sqlx::query(
            r#"
            UPDATE leads
            SET status = 'converted', updated_at = ?
            WHERE id = ? AND status != 'converted'
            "#,
        )
        .bind(now)
        .bind(&input.lead_id)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        if converted.rows_affected() == 0 {
            let exists = sqlx::query("SELECT id FROM leads WHERE id = ?")
                .bind(&input.lead_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;
            return Err(match exists {
                None => StorageError::NotFound,
                Some(_) => StorageError::Conflict(
                    "lead already converted to a proposal".to_string(),
                ),
            });
        }

        let proposal_id = ids::new_entity_id();
        let response_token = ids::new_response_token();
        let scope_json = serde_json::to_string(&input.scope_of_work)?;

        sqlx::query(
            r#"
            INSERT INTO proposals (id, lead_id, title, description, budget_estimate, timeline_estimate,
                                   payment_terms, scope_of_work, file_url, response_token, status,
                                   created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&proposal_id)
        .bind(&input.lead_id)
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(input.budget_estimate)
        .bind(&input.timeline_estimate)
        .bind(&input.payment_terms)
        .bind(&scope_json)
        .bind(&input.file_url)
        .bind(&response_token)
        .bind(ProposalStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let row = sqlx::query("SELECT * FROM proposals WHERE id = ?")
            .bind(&proposal_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        let proposal = row_to_proposal(&row)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!("Converted lead {} into proposal {}", proposal.lead_id, proposal.id);
        Ok(proposal)
    }

    /// Records the client's decision on a proposal. The response token is
    /// checked and consumed by one conditional update, so concurrent
    /// duplicate submissions collapse to a single winner; the first decision
    /// always stands. Approval creates the pending contract in the same
    /// transaction.
    pub async fn respond_to_proposal(
        &self,
        token: &str,
        decision: ProposalDecision,
    ) -> Result<ProposalResponseOutcome, StorageError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let updated = sqlx::query(
            r#"
            UPDATE proposals
            SET status = ?, responded_at = ?, updated_at = ?
            WHERE response_token = ? AND status = 'pending'
            "#,
        )
        .bind(decision.as_str())
        .bind(now)
        .bind(now)
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        if updated.rows_affected() == 0 {
            let exists = sqlx::query("SELECT id FROM proposals WHERE response_token = ?")
                .bind(token)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;
            return Err(match exists {
                None => StorageError::NotFound,
                Some(_) => StorageError::Conflict(
                    "a decision has already been recorded for this proposal".to_string(),
                ),
            });
        }

        let row = sqlx::query("SELECT * FROM proposals WHERE response_token = ?")
            .bind(token)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        let proposal = row_to_proposal(&row)?;

        let contract = if decision == ProposalDecision::Approved {
            let contract_id = ids::new_entity_id();
            debug!("Generating contract {} for proposal {}", contract_id, proposal.id);

            sqlx::query(
                r#"
                INSERT INTO contracts (id, proposal_id, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&contract_id)
            .bind(&proposal.id)
            .bind(ContractStatus::Pending.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

            let row = sqlx::query("SELECT * FROM contracts WHERE id = ?")
                .bind(&contract_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;
            Some(row_to_contract(&row)?)
        } else {
            None
        };

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!(
            "Recorded {} decision on proposal {}",
            decision.as_str(),
            proposal.id
        );
        Ok(ProposalResponseOutcome { proposal, contract })
    }

    /// Creates the installment plan for a signed contract. One schedule per
    /// contract; the sum of installments is deliberately not reconciled
    /// against the proposal's budget estimate.
    pub async fn create_payment_schedule(
        &self,
        contract_id: &str,
        installments: Vec<InstallmentInput>,
    ) -> Result<Vec<Payment>, StorageError> {
        if installments.is_empty() {
            return Err(StorageError::Validation(
                "at least one installment is required".to_string(),
            ));
        }
        if installments.iter().any(|i| i.amount <= 0.0) {
            return Err(StorageError::Validation(
                "installment amounts must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let contract_status: Option<String> =
            sqlx::query_scalar("SELECT status FROM contracts WHERE id = ?")
                .bind(contract_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;

        match contract_status.as_deref() {
            None => return Err(StorageError::NotFound),
            Some("signed") => {}
            Some(other) => {
                return Err(StorageError::Conflict(format!(
                    "cannot schedule payments on a {} contract",
                    other
                )));
            }
        }

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE contract_id = ?")
                .bind(contract_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;
        if existing > 0 {
            return Err(StorageError::Conflict(
                "a payment schedule already exists for this contract".to_string(),
            ));
        }

        for installment in &installments {
            sqlx::query(
                r#"
                INSERT INTO payments (id, contract_id, amount, due_date, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(ids::new_entity_id())
            .bind(contract_id)
            .bind(installment.amount)
            .bind(installment.due_date)
            .bind(PaymentStatus::Pending.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        }

        let rows = sqlx::query(
            "SELECT * FROM payments WHERE contract_id = ? ORDER BY due_date ASC, id ASC",
        )
        .bind(contract_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;
        let payments: Vec<Payment> = rows
            .iter()
            .map(row_to_payment)
            .collect::<Result<_, _>>()?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!(
            "Created {} installment(s) for contract {}",
            payments.len(),
            contract_id
        );
        Ok(payments)
    }
}
