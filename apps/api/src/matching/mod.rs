//! Match Generator — derives ranked career matches from a Career Profile.
//!
//! Matches append: every successful generation persists a new batch and
//! retains prior batches. Ordering is the order returned by the inference
//! call; no re-sorting is imposed here. A score outside 0..=100 rejects the
//! whole batch before anything is persisted.

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
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::models::career::{CareerMatchRow, CareerProfileRow};
use crate::models::user::UserInfo;

const MATCH_TEMPERATURE: f32 = 0.3;

/// One candidate career as returned by the inference call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPayload {
    pub career: String,
    pub compatibility_score: i32,
    pub reasoning: String,
    pub key_skills_aligned: Vec<String>,
    pub potential_challenges: Vec<String>,
    pub education_requirements: Vec<String>,
    pub growth_opportunities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatchBatchPayload {
    career_matches: Vec<MatchPayload>,
}

/// Runs the match inference call and validates the batch. Does not persist.
pub async fn generate_payload(
    llm: &dyn TextGenerator,
    profile: &CareerProfileRow,
    user_info: &UserInfo,
) -> Result<Vec<MatchPayload>, AppError> {
    let prompt = build_match_prompt(profile, user_info)?;
    let system = format!("{MATCH_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let text = llm
        .generate(&system, &[PromptMessage::user(prompt)], MATCH_TEMPERATURE)
        .await?;

    let batch: MatchBatchPayload = parse_json_payload(&text)
        .map_err(|e| AppError::SchemaViolation(format!("match payload did not parse: {e}")))?;

    validate_matches(&batch.career_matches)?;
    Ok(batch.career_matches)
}

/// A successful batch is non-empty and every score lies in 0..=100.
pub fn validate_matches(matches: &[MatchPayload]) -> Result<(), AppError> {
    if matches.is_empty() {
        return Err(AppError::InvalidMatch(
            "inference returned no career matches".to_string(),
        ));
    }

    for m in matches {
        if !(0..=100).contains(&m.compatibility_score) {
            return Err(AppError::InvalidMatch(format!(
                "compatibility_score {} for '{}' is outside 0..=100",
                m.compatibility_score, m.career
            )));
        }
    }
    Ok(())
}

fn build_match_prompt(
    profile: &CareerProfileRow,
    user_info: &UserInfo,
) -> Result<String, AppError> {
    let user_info_json = serde_json::to_string_pretty(user_info)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize user info: {e}")))?;
    let profile_json = serde_json::to_string_pretty(profile)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize profile: {e}")))?;

    Ok(MATCH_PROMPT_TEMPLATE
        .replace("{user_info_json}", &user_info_json)
        .replace("{profile_json}", &profile_json))
}

/// Appends a new batch of match rows in inference order.
pub async fn insert_matches(
    pool: &PgPool,
    user_id: Uuid,
    profile_id: Uuid,
    matches: &[MatchPayload],
) -> Result<Vec<CareerMatchRow>, AppError> {
    let mut rows = Vec::with_capacity(matches.len());

    for (position, m) in matches.iter().enumerate() {
        let row = sqlx::query_as::<_, CareerMatchRow>(
            r#"
            INSERT INTO career_matches
                (id, user_id, profile_id, position, career, compatibility_score, reasoning,
                 key_skills_aligned, potential_challenges, education_requirements,
                 growth_opportunities)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(profile_id)
        .bind(position as i32)
        .bind(&m.career)
        .bind(m.compatibility_score)
        .bind(&m.reasoning)
        .bind(&m.key_skills_aligned)
        .bind(&m.potential_challenges)
        .bind(&m.education_requirements)
        .bind(&m.growth_opportunities)
        .fetch_one(pool)
        .await?;
        rows.push(row);
    }

    info!("Appended {} career matches for user {user_id}", rows.len());
    Ok(rows)
}

/// All matches across batches, batches grouped and in inference order.
pub async fn list_matches(pool: &PgPool, user_id: Uuid) -> Result<Vec<CareerMatchRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerMatchRow>(
        "SELECT * FROM career_matches WHERE user_id = $1 ORDER BY created_at, position",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_match(pool: &PgPool, id: Uuid) -> Result<Option<CareerMatchRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerMatchRow>("SELECT * FROM career_matches WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::profile::tests::CannedGenerator;
    use chrono::Utc;
    use serde_json::json;

    pub(crate) fn sample_profile_row() -> CareerProfileRow {
        CareerProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            personality_type: "Analytical Builder".to_string(),
            primary_strengths: vec!["problem solving".to_string()],
            secondary_strengths: vec!["communication".to_string()],
            areas_for_improvement: vec!["public speaking".to_string()],
            learning_style: "Hands-on".to_string(),
            work_environment_preference: "Remote Work".to_string(),
            career_interests: vec!["Technology & Computing".to_string()],
            skill_summary: json!({
                "technical": [{"skill": "Programming", "level": 6}],
                "soft": [{"skill": "Teamwork", "level": 7}]
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_user_info() -> UserInfo {
        UserInfo {
            age: 17,
            education_level: "High School".to_string(),
            current_field: "Science stream".to_string(),
            goals: "Build software that matters".to_string(),
        }
    }

    fn match_json(score: i64) -> serde_json::Value {
        json!({
            "career": "Software Engineer",
            "compatibility_score": score,
            "reasoning": "Strong analytical profile with high technology interest",
            "key_skills_aligned": ["Programming", "Problem Solving"],
            "potential_challenges": ["Public speaking"],
            "education_requirements": ["Bachelor's in Computer Science"],
            "growth_opportunities": "High demand across industries"
        })
    }

    #[tokio::test]
    async fn test_generate_payload_accepts_valid_batch() {
        let body = json!({ "career_matches": [match_json(87), match_json(72)] }).to_string();
        let llm = CannedGenerator(body);
        let matches = generate_payload(&llm, &sample_profile_row(), &sample_user_info())
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].career, "Software Engineer");
        assert!(matches[0].compatibility_score >= 70);
    }

    #[tokio::test]
    async fn test_generate_payload_rejects_empty_batch() {
        let llm = CannedGenerator(json!({ "career_matches": [] }).to_string());
        let err = generate_payload(&llm, &sample_profile_row(), &sample_user_info())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidMatch(_)));
    }

    #[tokio::test]
    async fn test_generate_payload_rejects_score_above_100() {
        let llm = CannedGenerator(json!({ "career_matches": [match_json(101)] }).to_string());
        let err = generate_payload(&llm, &sample_profile_row(), &sample_user_info())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidMatch(_)));
    }

    #[tokio::test]
    async fn test_generate_payload_rejects_negative_score() {
        let llm = CannedGenerator(json!({ "career_matches": [match_json(-1)] }).to_string());
        assert!(generate_payload(&llm, &sample_profile_row(), &sample_user_info())
            .await
            .is_err());
    }

    #[test]
    fn test_boundary_scores_are_valid() {
        let low: MatchPayload = serde_json::from_value(match_json(0)).unwrap();
        let high: MatchPayload = serde_json::from_value(match_json(100)).unwrap();
        assert!(validate_matches(&[low, high]).is_ok());
    }

    #[tokio::test]
    async fn test_generate_payload_rejects_non_json() {
        let llm = CannedGenerator("Here are some matches: Software Engineer".to_string());
        let err = generate_payload(&llm, &sample_profile_row(), &sample_user_info())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation(_)));
    }
}
