// ABOUTME: HTTP request handler for the AI estimation chat
// ABOUTME: Pass-through to the estimation service; keeps the original wire shape

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Serialize)]
pub struct ChatError {
    pub error: String,
}

/// Forward the client's message to the estimation model and return the
/// reply verbatim. This endpoint keeps the original `{message}`/`{reply}`
/// wire shape rather than the standard envelope.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = request.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            ResponseJson(ChatError {
                error: "Message is required".to_string(),
            }),
        )
            .into_response();
    }

    info!("Forwarding estimate request ({} chars)", message.len());

    match state.ai.get_estimate(message).await {
        Ok(reply) => (StatusCode::OK, ResponseJson(ChatReply { reply })).into_response(),
        Err(e) => {
            error!("Estimate request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(ChatError {
                    error: "Failed to get estimate".to_string(),
                }),
            )
                .into_response()
        }
    }
}
