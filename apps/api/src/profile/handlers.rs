use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::AptitudeResponse;
use crate::models::career::CareerProfileRow;
use crate::models::user::UserInfo;
use crate::profile::{get_profile, replace_profile, synthesize_payload};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SynthesizeRequest {
    pub user_id: Uuid,
    pub user_info: UserInfo,
    pub answers: AptitudeResponse,
}

/// POST /api/v1/profile
///
/// Synthesizes a fresh profile and replaces any existing one for the user.
pub async fn handle_synthesize_profile(
    State(state): State<AppState>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<CareerProfileRow>, AppError> {
    let payload = synthesize_payload(state.llm.as_ref(), &req.answers, &req.user_info).await?;
    let row = replace_profile(&state.db, req.user_id, &payload).await?;
    Ok(Json(row))
}

/// GET /api/v1/profile?user_id=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CareerProfileRow>, AppError> {
    let row = get_profile(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No career profile for user {}", params.user_id)))?;
    Ok(Json(row))
}
