// ABOUTME: HTTP request handlers for the proposal response page
// ABOUTME: Token resolution and the single-use approve/reject decision

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use groundwork_proposals::ProposalDecision;
use groundwork_storage::StorageError;

use crate::current_user::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Resolve the proposal behind a response link
pub async fn get_proposal_for_response(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> impl IntoResponse {
    info!("Resolving proposal response token");

    match state.db.proposal_storage.get_by_token(&token).await {
        Ok(proposal) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(proposal))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for the proposal decision
#[derive(Deserialize)]
pub struct RespondRequest {
    pub token: String,
    pub response: String,
}

/// Record the client's decision. The token is single-use: a second call
/// gets a conflict and the first decision stands.
pub async fn respond_to_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<RespondRequest>,
) -> impl IntoResponse {
    info!("Recording proposal decision (actor: {})", user.id);

    let decision: ProposalDecision = match request.response.parse() {
        Ok(decision) => decision,
        Err(message) => return ApiError(StorageError::Validation(message)).into_response(),
    };

    match state
        .db
        .workflow
        .respond_to_proposal(&request.token, decision)
        .await
    {
        Ok(outcome) => (StatusCode::OK, ResponseJson(ApiResponse::success(outcome))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
