// ABOUTME: Tests for lead storage
// ABOUTME: Covers intake validation, listing order, and the conversion guard

use pretty_assertions::assert_eq;

use groundwork_storage::StorageError;

use crate::storage::LeadStorage;
use crate::types::{LeadCreateInput, LeadStatus};

async fn setup_storage() -> LeadStorage {
    let pool = groundwork_storage::connect_in_memory().await.unwrap();
    sqlx::migrate!("../storage/migrations")
        .run(&pool)
        .await
        .unwrap();
    LeadStorage::new(pool)
}

fn sample_input() -> LeadCreateInput {
    LeadCreateInput {
        client_name: "Juan Dela Cruz".to_string(),
        contact_info: "09171234567".to_string(),
        project_interest: "bungalow".to_string(),
        budget: "500000".to_string(),
        timeline: "3 months".to_string(),
    }
}

#[tokio::test]
async fn created_lead_starts_new_and_appears_in_list() {
    let storage = setup_storage().await;

    let lead = storage.create_lead(sample_input()).await.unwrap();
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.client_name, "Juan Dela Cruz");
    assert_eq!(lead.project_interest, "bungalow");

    let leads = storage.list_leads().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id, lead.id);
    assert_eq!(leads[0].status, LeadStatus::New);
}

#[tokio::test]
async fn create_lead_requires_client_name_and_contact() {
    let storage = setup_storage().await;

    let mut input = sample_input();
    input.client_name = "  ".to_string();
    let result = storage.create_lead(input).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));

    let mut input = sample_input();
    input.contact_info = String::new();
    let result = storage.create_lead(input).await;
    assert!(matches!(result, Err(StorageError::Validation(_))));
}

#[tokio::test]
async fn mark_contacted_moves_new_lead() {
    let storage = setup_storage().await;
    let lead = storage.create_lead(sample_input()).await.unwrap();

    let updated = storage.mark_contacted(&lead.id).await.unwrap();
    assert_eq!(updated.status, LeadStatus::Contacted);

    // A second call is a no-op success
    let again = storage.mark_contacted(&lead.id).await.unwrap();
    assert_eq!(again.status, LeadStatus::Contacted);
}

#[tokio::test]
async fn mark_contacted_refuses_converted_lead() {
    let storage = setup_storage().await;
    let lead = storage.create_lead(sample_input()).await.unwrap();

    // Simulate conversion done by the proposal workflow
    sqlx::query("UPDATE leads SET status = 'converted' WHERE id = ?")
        .bind(&lead.id)
        .execute(&storage.pool)
        .await
        .unwrap();

    let result = storage.mark_contacted(&lead.id).await;
    assert!(matches!(result, Err(StorageError::Conflict(_))));
}

#[tokio::test]
async fn get_unknown_lead_is_not_found() {
    let storage = setup_storage().await;
    let result = storage.get_lead("missing").await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}
