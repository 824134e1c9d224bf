use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::{
        metrics_manager::MetricsData,
        prompts::{MAX_MESSAGE_CHARS, suggestion},
        session_manager::{Message, SessionSnapshot},
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if payload.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }
    let reply = state.session.submit(&payload.message).await?;
    Ok(respond(&state, reply))
}

pub async fn suggestion_handler(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<Json<ChatResponse>, AppError> {
    let text = suggestion(index)
        .ok_or_else(|| AppError::NotFound(format!("no suggestion at index {index}")))?;
    debug!(index, "suggestion tapped");
    let reply = state.session.submit_suggestion(text).await?;
    Ok(respond(&state, reply))
}

pub async fn session_handler(State(state): State<SharedState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

fn respond(state: &SharedState, reply: Message) -> Json<ChatResponse> {
    Json(ChatResponse {
        reply,
        history_len: state.session.history().len(),
    })
}
