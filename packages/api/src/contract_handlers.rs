// ABOUTME: HTTP request handlers for the client contract page
// ABOUTME: Contract retrieval, document attachment, and the signing decision

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use groundwork_contracts::ContractAction;
use groundwork_storage::StorageError;

use crate::current_user::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Fetch the contract for a proposal
pub async fn get_contract(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> impl IntoResponse {
    info!("Fetching contract for proposal {}", proposal_id);

    match state.db.contract_storage.get_by_proposal(&proposal_id).await {
        Ok(contract) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(contract))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for attaching the contract document
#[derive(Deserialize)]
pub struct SetDocumentRequest {
    pub contract_file_url: String,
}

/// Attach the externally stored contract PDF reference
pub async fn set_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(proposal_id): Path<String>,
    Json(request): Json<SetDocumentRequest>,
) -> impl IntoResponse {
    info!(
        "Attaching contract document for proposal {} (actor: {})",
        proposal_id, user.id
    );

    if request.contract_file_url.trim().is_empty() {
        return ApiError(StorageError::Validation(
            "contract_file_url is required".to_string(),
        ))
        .into_response();
    }

    match state
        .db
        .contract_storage
        .set_document(&proposal_id, request.contract_file_url.trim())
        .await
    {
        Ok(contract) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(contract))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for the client's signing decision
#[derive(Deserialize)]
pub struct RespondToContractRequest {
    pub proposal_id: String,
    pub action: String,
}

/// Record the client's signing decision: digital, in_person, or rejected.
/// No re-signing once the contract leaves pending.
pub async fn respond_to_contract(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<RespondToContractRequest>,
) -> impl IntoResponse {
    info!(
        "Recording contract response for proposal {} (actor: {})",
        request.proposal_id, user.id
    );

    let action: ContractAction = match request.action.parse() {
        Ok(action) => action,
        Err(message) => return ApiError(StorageError::Validation(message)).into_response(),
    };

    match state
        .db
        .contract_storage
        .respond(&request.proposal_id, action)
        .await
    {
        Ok(contract) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(contract))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}
