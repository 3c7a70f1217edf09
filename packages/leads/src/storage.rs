// ABOUTME: Lead storage layer using SQLite
// ABOUTME: Handles intake, listing, and the contacted/converted status guard

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use groundwork_storage::{ids, StorageError};

use crate::types::{Lead, LeadCreateInput, LeadStatus};

pub struct LeadStorage {
    pub(crate) pool: SqlitePool,
}

impl LeadStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_lead(&self, input: LeadCreateInput) -> Result<Lead, StorageError> {
        if input.client_name.trim().is_empty() {
            return Err(StorageError::Validation(
                "client_name is required".to_string(),
            ));
        }
        if input.contact_info.trim().is_empty() {
            return Err(StorageError::Validation(
                "contact_info is required".to_string(),
            ));
        }

        let id = ids::new_entity_id();
        let now = Utc::now();
        debug!("Creating lead: {}", id);

        sqlx::query(
            r#"
            INSERT INTO leads (id, client_name, contact_info, project_interest, budget, timeline, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(input.client_name.trim())
        .bind(input.contact_info.trim())
        .bind(&input.project_interest)
        .bind(&input.budget)
        .bind(&input.timeline)
        .bind(LeadStatus::New.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_lead(&id).await
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, StorageError> {
        debug!("Listing leads");

        let rows = sqlx::query("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_lead).collect()
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Lead, StorageError> {
        debug!("Fetching lead: {}", lead_id);

        let row = sqlx::query("SELECT * FROM leads WHERE id = ?")
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_lead(&row)
    }

    /// Marks a lead as contacted. Conditional update: a converted lead is
    /// immutable and refuses the change; marking an already-contacted lead
    /// again is a no-op success.
    pub async fn mark_contacted(&self, lead_id: &str) -> Result<Lead, StorageError> {
        debug!("Marking lead contacted: {}", lead_id);

        let result = sqlx::query(
            r#"
            UPDATE leads
            SET status = 'contacted', updated_at = ?
            WHERE id = ? AND status = 'new'
            "#,
        )
        .bind(Utc::now())
        .bind(lead_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            let lead = self.get_lead(lead_id).await?;
            return match lead.status {
                LeadStatus::Contacted => Ok(lead),
                _ => Err(StorageError::Conflict(
                    "lead already converted to a proposal".to_string(),
                )),
            };
        }

        self.get_lead(lead_id).await
    }
}

pub fn row_to_lead(row: &sqlx::sqlite::SqliteRow) -> Result<Lead, StorageError> {
    let status: String = row.try_get("status")?;

    Ok(Lead {
        id: row.try_get("id")?,
        client_name: row.try_get("client_name")?,
        contact_info: row.try_get("contact_info")?,
        project_interest: row.try_get("project_interest")?,
        budget: row.try_get("budget")?,
        timeline: row.try_get("timeline")?,
        status: status.parse().map_err(StorageError::Database)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
