use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::ProgressUpdateRow;
use crate::profile::get_profile;
use crate::progress::{
    adapt_payload, insert_progress_update, latest_progress_update, progress_history,
    Participation, TestScore,
};
use crate::roadmap::{get_milestones, get_roadmap};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdaptProgressRequest {
    pub user_id: Uuid,
    pub test_scores: Vec<TestScore>,
    pub participation: Participation,
}

/// POST /api/v1/roadmaps/:id/progress
///
/// Runs the feedback stage and appends the resulting assessment. Milestone
/// and roadmap rows are never touched.
pub async fn handle_adapt_progress(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
    Json(req): Json<AdaptProgressRequest>,
) -> Result<Json<ProgressUpdateRow>, AppError> {
    let roadmap = get_roadmap(&state.db, roadmap_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Roadmap {roadmap_id} not found")))?;

    let milestones = get_milestones(&state.db, roadmap_id).await?;

    let profile = get_profile(&state.db, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No career profile for user {}", req.user_id)))?;

    let payload = adapt_payload(
        state.llm.as_ref(),
        &roadmap,
        &milestones,
        &req.test_scores,
        &req.participation,
        &profile,
    )
    .await?;

    let row = insert_progress_update(&state.db, req.user_id, roadmap_id, &payload).await?;
    Ok(Json(row))
}

/// GET /api/v1/roadmaps/:id/progress
pub async fn handle_progress_history(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<Vec<ProgressUpdateRow>>, AppError> {
    Ok(Json(progress_history(&state.db, roadmap_id).await?))
}

/// GET /api/v1/roadmaps/:id/progress/latest
pub async fn handle_latest_progress(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<ProgressUpdateRow>, AppError> {
    let row = latest_progress_update(&state.db, roadmap_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No progress updates for roadmap {roadmap_id}"))
        })?;
    Ok(Json(row))
}
