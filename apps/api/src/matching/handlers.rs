use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::{generate_payload, insert_matches, list_matches};
use crate::models::career::CareerMatchRow;
use crate::models::user::UserInfo;
use crate::profile::get_profile;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateMatchesRequest {
    pub user_id: Uuid,
    pub user_info: UserInfo,
}

/// POST /api/v1/matches
///
/// Generates a fresh batch of matches from the user's stored profile and
/// appends it. Prior batches are untouched.
pub async fn handle_generate_matches(
    State(state): State<AppState>,
    Json(req): Json<GenerateMatchesRequest>,
) -> Result<Json<Vec<CareerMatchRow>>, AppError> {
    let profile = get_profile(&state.db, req.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No career profile for user {}; synthesize a profile first",
                req.user_id
            ))
        })?;

    let matches = generate_payload(state.llm.as_ref(), &profile, &req.user_info).await?;
    let rows = insert_matches(&state.db, req.user_id, profile.id, &matches).await?;
    Ok(Json(rows))
}

/// GET /api/v1/matches?user_id=
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CareerMatchRow>>, AppError> {
    Ok(Json(list_matches(&state.db, params.user_id).await?))
}
