//! Profile Synthesizer — converts a complete questionnaire answer set plus
//! basic user facts into a structured Career Profile.
//!
//! The profile is a singleton-replace entity: regeneration overwrites the
//! user's existing row wholesale, never merges. One inference call, no
//! automatic retry on schema violations.

pub mod handlers;
pub mod prompts;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::{validate_all, AptitudeResponse};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_payload, PromptMessage, TextGenerator};
use crate::models::career::CareerProfileRow;
use crate::models::user::UserInfo;
use crate::profile::prompts::{PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM};

const SYNTHESIS_TEMPERATURE: f32 = 0.3;

/// One skill with its assessed 1..=10 level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevel {
    pub skill: String,
    pub level: u8,
}

/// Skill levels partitioned into technical and soft categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSummary {
    pub technical: Vec<SkillLevel>,
    pub soft: Vec<SkillLevel>,
}

/// The structured profile payload the inference call must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub personality_type: String,
    pub primary_strengths: Vec<String>,
    pub secondary_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub learning_style: String,
    pub work_environment_preference: String,
    pub career_interests: Vec<String>,
    pub skill_summary: SkillSummary,
}

/// Runs the synthesis inference call and validates the returned payload.
/// The answer set is re-validated first: incomplete intake never reaches the
/// oracle. Does not persist.
pub async fn synthesize_payload(
    llm: &dyn TextGenerator,
    answers: &AptitudeResponse,
    user_info: &UserInfo,
) -> Result<ProfilePayload, AppError> {
    validate_all(answers)?;

    let prompt = build_synthesis_prompt(answers, user_info)?;
    let system = format!("{PROFILE_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let text = llm
        .generate(&system, &[PromptMessage::user(prompt)], SYNTHESIS_TEMPERATURE)
        .await?;

    let payload: ProfilePayload = parse_json_payload(&text)
        .map_err(|e| AppError::SchemaViolation(format!("profile payload did not parse: {e}")))?;

    validate_profile_payload(&payload)?;
    Ok(payload)
}

/// Every skill level must lie in 1..=10.
pub fn validate_profile_payload(payload: &ProfilePayload) -> Result<(), AppError> {
    let all_skills = payload
        .skill_summary
        .technical
        .iter()
        .chain(payload.skill_summary.soft.iter());

    for entry in all_skills {
        if !(1..=10).contains(&entry.level) {
            return Err(AppError::SchemaViolation(format!(
                "skill '{}' has level {} outside 1..=10",
                entry.skill, entry.level
            )));
        }
    }
    Ok(())
}

fn build_synthesis_prompt(
    answers: &AptitudeResponse,
    user_info: &UserInfo,
) -> Result<String, AppError> {
    let user_info_json = serde_json::to_string_pretty(user_info)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize user info: {e}")))?;
    let answers_json = serde_json::to_string_pretty(answers)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize answers: {e}")))?;

    Ok(PROFILE_PROMPT_TEMPLATE
        .replace("{user_info_json}", &user_info_json)
        .replace("{answers_json}", &answers_json))
}

/// Wholesale replace: at most one profile row per user at any time.
pub async fn replace_profile(
    pool: &PgPool,
    user_id: Uuid,
    payload: &ProfilePayload,
) -> Result<CareerProfileRow, AppError> {
    let skill_summary = serde_json::to_value(&payload.skill_summary)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize skill summary: {e}")))?;

    let row = sqlx::query_as::<_, CareerProfileRow>(
        r#"
        INSERT INTO career_profiles
            (id, user_id, personality_type, primary_strengths, secondary_strengths,
             areas_for_improvement, learning_style, work_environment_preference,
             career_interests, skill_summary)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (user_id) DO UPDATE SET
            personality_type = EXCLUDED.personality_type,
            primary_strengths = EXCLUDED.primary_strengths,
            secondary_strengths = EXCLUDED.secondary_strengths,
            areas_for_improvement = EXCLUDED.areas_for_improvement,
            learning_style = EXCLUDED.learning_style,
            work_environment_preference = EXCLUDED.work_environment_preference,
            career_interests = EXCLUDED.career_interests,
            skill_summary = EXCLUDED.skill_summary,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.personality_type)
    .bind(&payload.primary_strengths)
    .bind(&payload.secondary_strengths)
    .bind(&payload.areas_for_improvement)
    .bind(&payload.learning_style)
    .bind(&payload.work_environment_preference)
    .bind(&payload.career_interests)
    .bind(&skill_summary)
    .fetch_one(pool)
    .await?;

    info!("Replaced career profile for user {user_id}");
    Ok(row)
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<CareerProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerProfileRow>("SELECT * FROM career_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
