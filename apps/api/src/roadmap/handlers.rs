use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::get_match;
use crate::models::career::{CareerRoadmapRow, MilestoneRow};
use crate::models::user::UserInfo;
use crate::profile::get_profile;
use crate::roadmap::{
    build_payload, get_milestones, get_roadmap, insert_roadmap, list_roadmaps,
    set_milestone_completion, RoadmapWithMilestones,
};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BuildRoadmapRequest {
    pub user_id: Uuid,
    pub career_match_id: Uuid,
    pub user_info: UserInfo,
}

/// POST /api/v1/roadmaps
///
/// Builds a new roadmap for the selected match. Existing roadmaps — for this
/// match or any other — are left untouched.
pub async fn handle_build_roadmap(
    State(state): State<AppState>,
    Json(req): Json<BuildRoadmapRequest>,
) -> Result<Json<RoadmapWithMilestones>, AppError> {
    let career_match = get_match(&state.db, req.career_match_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Career match {} not found", req.career_match_id))
        })?;

    let profile = get_profile(&state.db, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No career profile for user {}", req.user_id)))?;

    let payload = build_payload(state.llm.as_ref(), &career_match, &profile, &req.user_info).await?;
    let built = insert_roadmap(&state.db, req.user_id, career_match.id, &payload).await?;
    Ok(Json(built))
}

/// GET /api/v1/roadmaps?user_id=
pub async fn handle_list_roadmaps(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CareerRoadmapRow>>, AppError> {
    Ok(Json(list_roadmaps(&state.db, params.user_id).await?))
}

/// GET /api/v1/roadmaps/:id
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoadmapWithMilestones>, AppError> {
    let roadmap = get_roadmap(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Roadmap {id} not found")))?;
    let milestones = get_milestones(&state.db, id).await?;
    Ok(Json(RoadmapWithMilestones { roadmap, milestones }))
}

#[derive(Deserialize)]
pub struct MilestoneCompletionRequest {
    pub is_completed: bool,
}

/// PATCH /api/v1/milestones/:id/completion
pub async fn handle_set_milestone_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MilestoneCompletionRequest>,
) -> Result<Json<MilestoneRow>, AppError> {
    let row = set_milestone_completion(&state.db, id, req.is_completed).await?;
    Ok(Json(row))
}
