//! Roadmap Builder — expands one selected Career Match into a milestone-based
//! plan, plus the milestone completion toggle.
//!
//! Roadmaps branch: building again for the same or another match creates an
//! independent roadmap; prior ones are never deleted or altered. The toggle
//! is the single user-driven mutation in the entity graph.

pub mod handlers;
pub mod prompts;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_payload, PromptMessage, TextGenerator};
use crate::models::career::{CareerMatchRow, CareerProfileRow, CareerRoadmapRow, MilestoneRow};
use crate::models::user::UserInfo;
use crate::roadmap::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};

const ROADMAP_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillToAcquire {
    pub skill: String,
    pub importance: Importance,
    pub suggested_resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamCertification {
    pub name: String,
    pub description: String,
    pub timeline: String,
    pub preparation_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub focus: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestonePayload {
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub required_skills: Vec<String>,
    pub activities: Vec<String>,
    pub resources: Vec<String>,
}

/// The structured roadmap payload the inference call must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPayload {
    pub career: String,
    pub overview: String,
    pub timeframe: String,
    pub milestones: Vec<MilestonePayload>,
    pub skills_to_acquire: Vec<SkillToAcquire>,
    pub exams_certifications: Vec<ExamCertification>,
    pub project_ideas: Vec<ProjectIdea>,
    pub weekly_plan: WeeklyPlan,
}

/// A roadmap with its ordered milestones, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapWithMilestones {
    pub roadmap: CareerRoadmapRow,
    pub milestones: Vec<MilestoneRow>,
}

/// Runs the roadmap inference call and validates the payload. Does not persist.
pub async fn build_payload(
    llm: &dyn TextGenerator,
    career_match: &CareerMatchRow,
    profile: &CareerProfileRow,
    user_info: &UserInfo,
) -> Result<RoadmapPayload, AppError> {
    let prompt = build_roadmap_prompt(&career_match.career, profile, user_info)?;
    let system = format!("{ROADMAP_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let text = llm
        .generate(&system, &[PromptMessage::user(prompt)], ROADMAP_TEMPERATURE)
        .await?;

    let payload: RoadmapPayload = parse_json_payload(&text)
        .map_err(|e| AppError::RoadmapBuild(format!("roadmap payload did not parse: {e}")))?;

    validate_roadmap_payload(&payload)?;
    Ok(payload)
}

/// At least one milestone, and every milestone carries non-empty
/// `required_skills`, `activities` and `resources`. Empty sequences are
/// schema violations, not valid empty plans.
pub fn validate_roadmap_payload(payload: &RoadmapPayload) -> Result<(), AppError> {
    if payload.milestones.is_empty() {
        return Err(AppError::RoadmapBuild(
            "roadmap contains no milestones".to_string(),
        ));
    }

    for m in &payload.milestones {
        for (field, values) in [
            ("required_skills", &m.required_skills),
            ("activities", &m.activities),
            ("resources", &m.resources),
        ] {
            if values.is_empty() {
                return Err(AppError::RoadmapBuild(format!(
                    "milestone '{}' has an empty {field} sequence",
                    m.title
                )));
            }
        }
    }
    Ok(())
}

fn build_roadmap_prompt(
    career: &str,
    profile: &CareerProfileRow,
    user_info: &UserInfo,
) -> Result<String, AppError> {
    let user_info_json = serde_json::to_string_pretty(user_info)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize user info: {e}")))?;
    let profile_json = serde_json::to_string_pretty(profile)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize profile: {e}")))?;

    Ok(ROADMAP_PROMPT_TEMPLATE
        .replace("{career}", career)
        .replace("{user_info_json}", &user_info_json)
        .replace("{profile_json}", &profile_json))
}

/// Persists a new roadmap and its milestones. Every milestone starts
/// `is_completed = false` with a NULL `completed_at`.
pub async fn insert_roadmap(
    pool: &PgPool,
    user_id: Uuid,
    career_match_id: Uuid,
    payload: &RoadmapPayload,
) -> Result<RoadmapWithMilestones, AppError> {
    let skills = serde_json::to_value(&payload.skills_to_acquire)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize skills: {e}")))?;
    let exams = serde_json::to_value(&payload.exams_certifications)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize certifications: {e}")))?;
    let projects = serde_json::to_value(&payload.project_ideas)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize project ideas: {e}")))?;
    let weekly = serde_json::to_value(&payload.weekly_plan)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize weekly plan: {e}")))?;

    let roadmap = sqlx::query_as::<_, CareerRoadmapRow>(
        r#"
        INSERT INTO career_roadmaps
            (id, user_id, career_match_id, career, overview, timeframe,
             skills_to_acquire, exams_certifications, project_ideas, weekly_plan)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(career_match_id)
    .bind(&payload.career)
    .bind(&payload.overview)
    .bind(&payload.timeframe)
    .bind(&skills)
    .bind(&exams)
    .bind(&projects)
    .bind(&weekly)
    .fetch_one(pool)
    .await?;

    let mut milestones = Vec::with_capacity(payload.milestones.len());
    for (position, m) in payload.milestones.iter().enumerate() {
        let row = sqlx::query_as::<_, MilestoneRow>(
            r#"
            INSERT INTO roadmap_milestones
                (id, roadmap_id, position, title, description, timeline,
                 required_skills, activities, resources, is_completed, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(roadmap.id)
        .bind(position as i32)
        .bind(&m.title)
        .bind(&m.description)
        .bind(&m.timeline)
        .bind(&m.required_skills)
        .bind(&m.activities)
        .bind(&m.resources)
        .fetch_one(pool)
        .await?;
        milestones.push(row);
    }

    info!(
        "Built roadmap {} ({} milestones) for user {user_id}, match {career_match_id}",
        roadmap.id,
        milestones.len()
    );

    Ok(RoadmapWithMilestones { roadmap, milestones })
}

pub async fn get_roadmap(pool: &PgPool, id: Uuid) -> Result<Option<CareerRoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerRoadmapRow>("SELECT * FROM career_roadmaps WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_roadmaps(pool: &PgPool, user_id: Uuid) -> Result<Vec<CareerRoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerRoadmapRow>(
        "SELECT * FROM career_roadmaps WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn latest_roadmap(pool: &PgPool, user_id: Uuid) -> Result<Option<CareerRoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerRoadmapRow>(
        "SELECT * FROM career_roadmaps WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_milestones(pool: &PgPool, roadmap_id: Uuid) -> Result<Vec<MilestoneRow>, sqlx::Error> {
    sqlx::query_as::<_, MilestoneRow>(
        "SELECT * FROM roadmap_milestones WHERE roadmap_id = $1 ORDER BY position",
    )
    .bind(roadmap_id)
    .fetch_all(pool)
    .await
}

/// The milestone completion toggle: `pending → completed` stamps
/// `completed_at = now()`, `completed → pending` clears it. Always permitted;
/// single-field update with last-write-wins semantics.
pub async fn set_milestone_completion(
    pool: &PgPool,
    milestone_id: Uuid,
    is_completed: bool,
) -> Result<MilestoneRow, AppError> {
    let row = sqlx::query_as::<_, MilestoneRow>(
        r#"
        UPDATE roadmap_milestones
        SET is_completed = $2,
            completed_at = CASE WHEN $2 THEN now() ELSE NULL END
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(milestone_id)
    .bind(is_completed)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Milestone {milestone_id} not found")))?;

    info!(
        "Milestone {milestone_id} marked {}",
        if is_completed { "completed" } else { "pending" }
    );
    Ok(row)
}
