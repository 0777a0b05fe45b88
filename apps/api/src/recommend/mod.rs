//! Course Recommendations — maps a roadmap onto the platform's own catalogue
//! of courses, tests and live sessions.

pub mod handlers;
pub mod prompts;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_payload, PromptMessage, TextGenerator};
use crate::models::career::{CareerProfileRow, CareerRoadmapRow, CourseRecommendationRow, MilestoneRow};
use crate::recommend::prompts::{RECOMMEND_PROMPT_TEMPLATE, RECOMMEND_SYSTEM};
use crate::roadmap::Importance;

const RECOMMEND_TEMPERATURE: f32 = 0.3;

/// One recommended platform resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedResource {
    pub name: String,
    pub relevance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligned_milestone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Importance>,
}

/// The structured recommendation payload the inference call must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPayload {
    pub recommended_courses: Vec<RecommendedResource>,
    pub recommended_tests: Vec<RecommendedResource>,
    pub recommended_sessions: Vec<RecommendedResource>,
    pub suggested_learning_path: String,
}

/// Runs the recommendation inference call. Does not persist.
pub async fn recommend_payload(
    llm: &dyn TextGenerator,
    roadmap: &CareerRoadmapRow,
    milestones: &[MilestoneRow],
    profile: &CareerProfileRow,
    catalogue: &Value,
) -> Result<RecommendationPayload, AppError> {
    let prompt = build_recommend_prompt(roadmap, milestones, profile, catalogue)?;
    let system = format!("{RECOMMEND_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let text = llm
        .generate(&system, &[PromptMessage::user(prompt)], RECOMMEND_TEMPERATURE)
        .await?;

    parse_json_payload(&text)
        .map_err(|e| AppError::SchemaViolation(format!("recommendation payload did not parse: {e}")))
}

fn build_recommend_prompt(
    roadmap: &CareerRoadmapRow,
    milestones: &[MilestoneRow],
    profile: &CareerProfileRow,
    catalogue: &Value,
) -> Result<String, AppError> {
    let ser = |label: &str, value: serde_json::Result<String>| -> Result<String, AppError> {
        value.map_err(|e| AppError::Internal(anyhow!("Failed to serialize {label}: {e}")))
    };

    let profile_json = ser("profile", serde_json::to_string_pretty(profile))?;
    let roadmap_json = ser("roadmap", serde_json::to_string_pretty(roadmap))?;
    let milestones_json = ser("milestones", serde_json::to_string_pretty(milestones))?;
    let catalogue_json = ser("catalogue", serde_json::to_string_pretty(catalogue))?;

    Ok(RECOMMEND_PROMPT_TEMPLATE
        .replace("{career}", &roadmap.career)
        .replace("{profile_json}", &profile_json)
        .replace("{roadmap_json}", &roadmap_json)
        .replace("{milestones_json}", &milestones_json)
        .replace("{catalogue_json}", &catalogue_json))
}

/// Appends a recommendation set; the latest per roadmap is "current".
pub async fn insert_recommendation(
    pool: &PgPool,
    user_id: Uuid,
    roadmap_id: Uuid,
    payload: &RecommendationPayload,
) -> Result<CourseRecommendationRow, AppError> {
    let ser = |label: &str, value: serde_json::Result<Value>| -> Result<Value, AppError> {
        value.map_err(|e| AppError::Internal(anyhow!("Failed to serialize {label}: {e}")))
    };

    let courses = ser("courses", serde_json::to_value(&payload.recommended_courses))?;
    let tests = ser("tests", serde_json::to_value(&payload.recommended_tests))?;
    let sessions = ser("sessions", serde_json::to_value(&payload.recommended_sessions))?;

    let row = sqlx::query_as::<_, CourseRecommendationRow>(
        r#"
        INSERT INTO course_recommendations
            (id, user_id, roadmap_id, recommended_courses, recommended_tests,
             recommended_sessions, suggested_learning_path)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(roadmap_id)
    .bind(&courses)
    .bind(&tests)
    .bind(&sessions)
    .bind(&payload.suggested_learning_path)
    .fetch_one(pool)
    .await?;

    info!("Appended course recommendations {} for roadmap {roadmap_id}", row.id);
    Ok(row)
}

pub async fn latest_recommendation(
    pool: &PgPool,
    roadmap_id: Uuid,
) -> Result<Option<CourseRecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseRecommendationRow>(
        "SELECT * FROM course_recommendations WHERE roadmap_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(roadmap_id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_payload_deserializes_with_optional_fields() {
        let body = json!({
            "recommended_courses": [
                {"name": "Intro to Python", "relevance": "Covers milestone 1 fundamentals",
                 "aligned_milestone": "Learn programming fundamentals", "priority": "High"}
            ],
            "recommended_tests": [
                {"name": "Aptitude mock test", "relevance": "Tracks analytical progress"}
            ],
            "recommended_sessions": [],
            "suggested_learning_path": "Start with Python, then data structures"
        });

        let payload: RecommendationPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.recommended_courses[0].priority, Some(Importance::High));
        assert!(payload.recommended_tests[0].priority.is_none());
        assert!(payload.recommended_sessions.is_empty());
    }

    #[test]
    fn test_recommendation_payload_rejects_bad_priority() {
        let body = json!({
            "recommended_courses": [
                {"name": "X", "relevance": "Y", "priority": "Urgent"}
            ],
            "recommended_tests": [],
            "recommended_sessions": [],
            "suggested_learning_path": "path"
        });
        assert!(serde_json::from_value::<RecommendationPayload>(body).is_err());
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let resource = RecommendedResource {
            name: "Mock test".to_string(),
            relevance: "tracking".to_string(),
            aligned_milestone: None,
            priority: None,
        };
        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("aligned_milestone").is_none());
        assert!(json.get("priority").is_none());
    }
}
