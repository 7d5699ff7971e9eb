use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
    trace_id::TraceId,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    trace_id: TraceId,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::info!(reason = %rejection.body_text(), "Rejecting malformed chat request");
        AppError::BadRequest(rejection.body_text())
    })?;

    tracing::info!(message_length = payload.message.len(), "Chat request received");

    if payload.message.trim().is_empty() {
        tracing::info!("Rejecting empty chat message");
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let answer = state
        .completer
        .complete(&payload.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, completer = state.completer.name(), "Chat completion failed");
            AppError::Upstream(format!("Error processing chat request: {e}"))
        })?;

    Ok(Json(ChatResponse {
        answer,
        trace_id: trace_id.into(),
    }))
}
