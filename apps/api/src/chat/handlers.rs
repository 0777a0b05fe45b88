use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{chat_history, chat_reply, insert_message};
use crate::errors::AppError;
use crate::models::career::ChatMessageRow;
use crate::profile::get_profile;
use crate::roadmap::latest_roadmap;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/chat
///
/// Sends one chat turn with the user's stored history, profile and most
/// recent roadmap as context, and persists both sides of the exchange.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Chat message is empty".to_string()));
    }

    let history = chat_history(&state.db, req.user_id).await?;
    let profile = get_profile(&state.db, req.user_id).await?;
    let roadmap = latest_roadmap(&state.db, req.user_id).await?;

    let reply = chat_reply(
        state.llm.as_ref(),
        &history,
        profile.as_ref(),
        roadmap.as_ref(),
        &req.message,
    )
    .await?;

    insert_message(&state.db, req.user_id, true, &req.message).await?;
    insert_message(&state.db, req.user_id, false, &reply).await?;

    Ok(Json(ChatResponse { reply }))
}

/// GET /api/v1/chat?user_id=
pub async fn handle_chat_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ChatMessageRow>>, AppError> {
    Ok(Json(chat_history(&state.db, params.user_id).await?))
}
