// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and storage layers

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use groundwork_contracts::ContractStorage;
use groundwork_leads::LeadStorage;
use groundwork_payments::PaymentStorage;
use groundwork_proposals::ProposalStorage;
use groundwork_storage::StorageError;

use crate::workflow::WorkflowStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub lead_storage: Arc<LeadStorage>,
    pub proposal_storage: Arc<ProposalStorage>,
    pub contract_storage: Arc<ContractStorage>,
    pub payment_storage: Arc<PaymentStorage>,
    pub workflow: Arc<WorkflowStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let lead_storage = Arc::new(LeadStorage::new(pool.clone()));
        let proposal_storage = Arc::new(ProposalStorage::new(pool.clone()));
        let contract_storage = Arc::new(ContractStorage::new(pool.clone()));
        let payment_storage = Arc::new(PaymentStorage::new(pool.clone()));
        let workflow = Arc::new(WorkflowStorage::new(pool.clone()));

        Self {
            pool,
            lead_storage,
            proposal_storage,
            contract_storage,
            payment_storage,
            workflow,
        }
    }

    /// Opens the database at `path` and runs pending migrations
    pub async fn connect(path: &Path) -> Result<Self, StorageError> {
        let pool = groundwork_storage::connect(path).await?;

        info!("Running database migrations");
        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(Self::new(pool))
    }

    /// In-memory database with migrations applied, for tests
    pub async fn connect_in_memory() -> Result<Self, StorageError> {
        let pool = groundwork_storage::connect_in_memory().await?;

        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(Self::new(pool))
    }
}
