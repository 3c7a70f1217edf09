// ABOUTME: HTTP request handlers for the client project tracking page
// ABOUTME: Read-only aggregation of one client's lifecycle chain

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::info;

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Aggregate lead, proposal, contract, and payments for one client
pub async fn get_client_project(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("Fetching client project for {}", user_id);

    match state.db.client_project(&user_id).await {
        Ok(view) => (StatusCode::OK, ResponseJson(ApiResponse::success(view))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
