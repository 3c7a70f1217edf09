// ABOUTME: Payment storage layer using SQLite
// ABOUTME: Due-date-ordered schedule listing and idempotent payment marking

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use groundwork_storage::StorageError;

use crate::types::{Payment, PaymentStatus};

pub struct PaymentStorage {
    pub(crate) pool: SqlitePool,
}

impl PaymentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment, StorageError> {
        debug!("Fetching payment: {}", payment_id);

        let row = sqlx::query("SELECT * FROM payments WHERE id = ?")
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_payment(&row)
    }

    /// Installments for a contract, due-date ascending. An empty schedule is
    /// a valid empty list, not an error.
    pub async fn list_for_contract(
        &self,
        contract_id: &str,
    ) -> Result<Vec<Payment>, StorageError> {
        debug!("Listing payments for contract: {}", contract_id);

        let rows = sqlx::query(
            "SELECT * FROM payments WHERE contract_id = ? ORDER BY due_date ASC, id ASC",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_payment).collect()
    }

    /// Marks a payment as paid. Idempotent: a conditional update moves a
    /// pending payment, and a payment that is already Paid comes back
    /// unchanged as a no-op success.
    pub async fn pay(&self, payment_id: &str) -> Result<Payment, StorageError> {
        debug!("Marking payment paid: {}", payment_id);

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE payments
            SET status = 'Paid', paid_at = ?, updated_at = ?
            WHERE id = ? AND status = 'Pending'
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(payment_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        // Unknown id still needs to surface as not-found
        let payment = self.get_payment(payment_id).await?;
        debug_assert_eq!(payment.status, PaymentStatus::Paid);
        Ok(payment)
    }
}

pub fn row_to_payment(row: &sqlx::sqlite::SqliteRow) -> Result<Payment, StorageError> {
    let status: String = row.try_get("status")?;

    Ok(Payment {
        id: row.try_get("id")?,
        contract_id: row.try_get("contract_id")?,
        amount: row.try_get("amount")?,
        due_date: row.try_get("due_date")?,
        status: status.parse().map_err(StorageError::Database)?,
        paid_at: row.try_get("paid_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
