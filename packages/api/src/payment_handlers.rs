// ABOUTME: HTTP request handlers for the payment page
// ABOUTME: Schedule listing and idempotent pay-now

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::info;

use crate::current_user::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Installments for a contract, due-date ascending. An empty schedule is a
/// valid empty list.
pub async fn list_for_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
) -> impl IntoResponse {
    info!("Listing payments for contract {}", contract_id);

    match state.db.payment_storage.list_for_contract(&contract_id).await {
        Ok(payments) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(payments))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Mark a payment as paid. Double submission is a no-op success.
pub async fn pay(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    info!("Paying payment {} (actor: {})", payment_id, user.id);

    match state.db.payment_storage.pay(&payment_id).await {
        Ok(payment) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(payment))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}
