// ABOUTME: HTTP request handlers for the sales pages
// ABOUTME: Lead intake, contact tracking, and proposal creation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use groundwork_leads::LeadCreateInput;
use groundwork_proposals::ProposalCreateInput;
use groundwork_storage::StorageError;

use crate::current_user::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// List all leads, newest first
pub async fn list_leads(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing leads");

    match state.db.lead_storage.list_leads().await {
        Ok(leads) => (StatusCode::OK, ResponseJson(ApiResponse::success(leads))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Create a lead from the intake form
pub async fn create_lead(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<LeadCreateInput>,
) -> impl IntoResponse {
    info!("Creating lead (actor: {})", user.id);

    match state.db.lead_storage.create_lead(input).await {
        Ok(lead) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(lead)),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for updating a lead's status
#[derive(Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: String,
}

/// Mark a lead as contacted. Conversion happens only through proposal
/// creation, so `contacted` is the single accepted target here.
pub async fn update_lead_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(lead_id): Path<String>,
    Json(request): Json<UpdateLeadStatusRequest>,
) -> impl IntoResponse {
    info!("Updating lead {} status (actor: {})", lead_id, user.id);

    if request.status != "contacted" {
        return ApiError(StorageError::Validation(format!(
            "unsupported status update: {}",
            request.status
        )))
        .into_response();
    }

    match state.db.lead_storage.mark_contacted(&lead_id).await {
        Ok(lead) => (StatusCode::OK, ResponseJson(ApiResponse::success(lead))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// List all proposals, newest first
pub async fn list_proposals(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing proposals");

    match state.db.proposal_storage.list_proposals().await {
        Ok(proposals) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(proposals))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Convert a lead into a proposal with a fresh response token
pub async fn create_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<ProposalCreateInput>,
) -> impl IntoResponse {
    info!(
        "Creating proposal for lead {} (actor: {})",
        input.lead_id, user.id
    );

    match state.db.workflow.create_proposal(input).await {
        Ok(proposal) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(proposal)),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
