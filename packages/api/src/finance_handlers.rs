// ABOUTME: HTTP request handlers for the finance review page
// ABOUTME: Pending-contract queue, approve/reject review, schedule creation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use groundwork_contracts::ReviewAction;
use groundwork_payments::InstallmentInput;
use groundwork_storage::StorageError;

use crate::current_user::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// The review queue: exactly the contracts still pending
pub async fn list_pending_contracts(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing pending contracts for review");

    match state.db.contract_storage.list_pending().await {
        Ok(contracts) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(contracts))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Finance decision on a pending contract. A refused or failed action
/// leaves the contract unchanged and still in the queue.
pub async fn review_contract(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((contract_id, action)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "Finance review {} on contract {} (actor: {})",
        action, contract_id, user.id
    );

    let action: ReviewAction = match action.parse() {
        Ok(action) => action,
        Err(message) => return ApiError(StorageError::Validation(message)).into_response(),
    };

    match state.db.contract_storage.review(&contract_id, action).await {
        Ok(contract) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(contract))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for creating the installment plan
#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub installments: Vec<InstallmentInput>,
}

/// Create the payment schedule for a signed contract
pub async fn create_schedule(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(contract_id): Path<String>,
    Json(request): Json<CreateScheduleRequest>,
) -> impl IntoResponse {
    info!(
        "Creating payment schedule for contract {} (actor: {})",
        contract_id, user.id
    );

    match state
        .db
        .workflow
        .create_payment_schedule(&contract_id, request.installments)
        .await
    {
        Ok(payments) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(payments)),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
