use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CourseRecommendationRow;
use crate::profile::get_profile;
use crate::recommend::{insert_recommendation, latest_recommendation, recommend_payload};
use crate::roadmap::{get_milestones, get_roadmap};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub user_id: Uuid,
    /// The platform catalogue (courses, tests, sessions) as structured JSON.
    pub platform_courses: Value,
}

/// POST /api/v1/roadmaps/:id/recommendations
pub async fn handle_recommend_courses(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<CourseRecommendationRow>, AppError> {
    let roadmap = get_roadmap(&state.db, roadmap_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Roadmap {roadmap_id} not found")))?;

    let milestones = get_milestones(&state.db, roadmap_id).await?;

    let profile = get_profile(&state.db, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No career profile for user {}", req.user_id)))?;

    let payload = recommend_payload(
        state.llm.as_ref(),
        &roadmap,
        &milestones,
        &profile,
        &req.platform_courses,
    )
    .await?;

    let row = insert_recommendation(&state.db, req.user_id, roadmap_id, &payload).await?;
    Ok(Json(row))
}

/// GET /api/v1/roadmaps/:id/recommendations/latest
pub async fn handle_latest_recommendation(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<CourseRecommendationRow>, AppError> {
    let row = latest_recommendation(&state.db, roadmap_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No recommendations for roadmap {roadmap_id}"))
        })?;
    Ok(Json(row))
}
