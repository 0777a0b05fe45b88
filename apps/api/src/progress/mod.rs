//! Progress Adapter — the pipeline's feedback stage.
//!
//! Consumes roadmap completion state plus caller-supplied performance signals
//! and appends a qualitative assessment with advisory timeline adjustments.
//! Strictly append-only: milestone and roadmap rows are never mutated here.

pub mod handlers;
pub mod prompts;

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_payload, PromptMessage, TextGenerator};
use crate::models::career::{CareerProfileRow, CareerRoadmapRow, MilestoneRow, ProgressUpdateRow};
use crate::progress::prompts::{PROGRESS_PROMPT_TEMPLATE, PROGRESS_SYSTEM};

const PROGRESS_TEMPERATURE: f32 = 0.4;

/// One observed test result, supplied by the telemetry collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestScore {
    pub test_id: String,
    pub score: f64,
    pub max_score: f64,
    pub date: DateTime<Utc>,
}

/// Participation metrics, supplied by the telemetry collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub live_class_participation: u32,
    pub questions_asked: u32,
    pub assignments_completed: u32,
}

/// An advisory timeline adjustment referencing an existing milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustedMilestone {
    pub milestone_id: Uuid,
    pub adjusted_timeline: String,
    pub adjustment_reason: String,
}

/// The structured progress payload the inference call must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressPayload {
    pub progress_summary: String,
    pub achievement_level: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub adjusted_milestones: Vec<AdjustedMilestone>,
    pub feedback: String,
    pub motivation: String,
    pub next_steps: Vec<String>,
}

/// Runs the adaptation inference call and validates the payload against the
/// roadmap's milestone set. Does not persist.
pub async fn adapt_payload(
    llm: &dyn TextGenerator,
    roadmap: &CareerRoadmapRow,
    milestones: &[MilestoneRow],
    test_scores: &[TestScore],
    participation: &Participation,
    profile: &CareerProfileRow,
) -> Result<ProgressPayload, AppError> {
    let prompt = build_progress_prompt(roadmap, milestones, test_scores, participation, profile)?;
    let system = format!("{PROGRESS_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let text = llm
        .generate(&system, &[PromptMessage::user(prompt)], PROGRESS_TEMPERATURE)
        .await?;

    let payload: ProgressPayload = parse_json_payload(&text)
        .map_err(|e| AppError::SchemaViolation(format!("progress payload did not parse: {e}")))?;

    let known_ids: HashSet<Uuid> = milestones.iter().map(|m| m.id).collect();
    validate_adjustments(&payload, &known_ids)?;
    Ok(payload)
}

/// Every adjustment must reference a milestone of the supplied roadmap.
/// An unknown id rejects the whole update — nothing is silently dropped.
pub fn validate_adjustments(
    payload: &ProgressPayload,
    known_ids: &HashSet<Uuid>,
) -> Result<(), AppError> {
    for adjustment in &payload.adjusted_milestones {
        if !known_ids.contains(&adjustment.milestone_id) {
            return Err(AppError::SchemaViolation(format!(
                "adjustment references unknown milestone {}",
                adjustment.milestone_id
            )));
        }
    }
    Ok(())
}

fn build_progress_prompt(
    roadmap: &CareerRoadmapRow,
    milestones: &[MilestoneRow],
    test_scores: &[TestScore],
    participation: &Participation,
    profile: &CareerProfileRow,
) -> Result<String, AppError> {
    let completed: Vec<&MilestoneRow> = milestones.iter().filter(|m| m.is_completed).collect();

    let ser = |label: &str, value: serde_json::Result<String>| -> Result<String, AppError> {
        value.map_err(|e| AppError::Internal(anyhow!("Failed to serialize {label}: {e}")))
    };

    let roadmap_json = ser("roadmap", serde_json::to_string_pretty(roadmap))?;
    let milestones_json = ser("milestones", serde_json::to_string_pretty(milestones))?;
    let completed_json = ser("completed milestones", serde_json::to_string_pretty(&completed))?;
    let test_scores_json = ser("test scores", serde_json::to_string_pretty(test_scores))?;
    let participation_json = ser("participation", serde_json::to_string_pretty(participation))?;
    let profile_json = ser("profile", serde_json::to_string_pretty(profile))?;

    Ok(PROGRESS_PROMPT_TEMPLATE
        .replace("{roadmap_json}", &roadmap_json)
        .replace("{milestones_json}", &milestones_json)
        .replace("{completed_json}", &completed_json)
        .replace("{test_scores_json}", &test_scores_json)
        .replace("{participation_json}", &participation_json)
        .replace("{profile_json}", &profile_json))
}

/// Append-only INSERT. Never UPDATE existing progress rows.
pub async fn insert_progress_update(
    pool: &PgPool,
    user_id: Uuid,
    roadmap_id: Uuid,
    payload: &ProgressPayload,
) -> Result<ProgressUpdateRow, AppError> {
    let adjusted = serde_json::to_value(&payload.adjusted_milestones)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize adjustments: {e}")))?;

    let row = sqlx::query_as::<_, ProgressUpdateRow>(
        r#"
        INSERT INTO progress_updates
            (id, user_id, roadmap_id, progress_summary, achievement_level, strengths,
             areas_for_improvement, adjusted_milestones, feedback, motivation, next_steps)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(roadmap_id)
    .bind(&payload.progress_summary)
    .bind(&payload.achievement_level)
    .bind(&payload.strengths)
    .bind(&payload.areas_for_improvement)
    .bind(&adjusted)
    .bind(&payload.feedback)
    .bind(&payload.motivation)
    .bind(&payload.next_steps)
    .fetch_one(pool)
    .await?;

    info!("Appended progress update {} for roadmap {roadmap_id}", row.id);
    Ok(row)
}

/// Full assessment history, oldest first.
pub async fn progress_history(
    pool: &PgPool,
    roadmap_id: Uuid,
) -> Result<Vec<ProgressUpdateRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressUpdateRow>(
        "SELECT * FROM progress_updates WHERE roadmap_id = $1 ORDER BY created_at ASC",
    )
    .bind(roadmap_id)
    .fetch_all(pool)
    .await
}

/// The most recent update is "current".
pub async fn latest_progress_update(
    pool: &PgPool,
    roadmap_id: Uuid,
) -> Result<Option<ProgressUpdateRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressUpdateRow>(
        "SELECT * FROM progress_updates WHERE roadmap_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(roadmap_id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tests::sample_profile_row;
    use crate::profile::tests::CannedGenerator;
    use serde_json::json;

    fn sample_roadmap_row() -> CareerRoadmapRow {
        CareerRoadmapRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            career_match_id: Uuid::new_v4(),
            career: "Software Engineer".to_string(),
            overview: "A three-year path".to_string(),
            timeframe: "3 years".to_string(),
            skills_to_acquire: json!([]),
            exams_certifications: json!([]),
            project_ideas: json!([]),
            weekly_plan: json!({"focus": "Fundamentals", "activities": []}),
            created_at: Utc::now(),
        }
    }

    fn sample_milestone(roadmap_id: Uuid, position: i32, completed: bool) -> MilestoneRow {
        MilestoneRow {
            id: Uuid::new_v4(),
            roadmap_id,
            position,
            title: format!("Milestone {position}"),
            description: "Work through the fundamentals".to_string(),
            timeline: format!("Months {}-{}", position * 6 + 1, position * 6 + 6),
            required_skills: vec!["Programming basics".to_string()],
            activities: vec!["Complete an online course".to_string()],
            resources: vec!["freeCodeCamp".to_string()],
            is_completed: completed,
            completed_at: completed.then(Utc::now),
        }
    }

    fn sample_telemetry() -> (Vec<TestScore>, Participation) {
        (
            vec![
                TestScore { test_id: "test1".to_string(), score: 85.0, max_score: 100.0, date: Utc::now() },
                TestScore { test_id: "test2".to_string(), score: 92.0, max_score: 100.0, date: Utc::now() },
            ],
            Participation {
                live_class_participation: 75,
                questions_asked: 12,
                assignments_completed: 8,
            },
        )
    }

    fn progress_json(adjusted: serde_json::Value) -> String {
        json!({
            "progress_summary": "Solid early progress",
            "achievement_level": "On track",
            "strengths": ["Consistent study habits"],
            "areas_for_improvement": ["More hands-on projects"],
            "adjusted_milestones": adjusted,
            "feedback": "Keep the current pace",
            "motivation": "You are ahead of where most students are at this point",
            "next_steps": ["Start the portfolio project"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_adapt_payload_accepts_known_milestone_ids() {
        let roadmap = sample_roadmap_row();
        let milestones = vec![
            sample_milestone(roadmap.id, 0, true),
            sample_milestone(roadmap.id, 1, false),
        ];
        let adjusted = json!([{
            "milestone_id": milestones[1].id,
            "adjusted_timeline": "Months 7-15",
            "adjustment_reason": "Strong test scores justify acceleration"
        }]);
        let llm = CannedGenerator(progress_json(adjusted));
        let (scores, participation) = sample_telemetry();

        let payload = adapt_payload(
            &llm,
            &roadmap,
            &milestones,
            &scores,
            &participation,
            &sample_profile_row(),
        )
        .await
        .unwrap();
        assert!(!payload.strengths.is_empty());
        assert_eq!(payload.adjusted_milestones.len(), 1);
    }

    #[tokio::test]
    async fn test_adapt_payload_rejects_unknown_milestone_id() {
        let roadmap = sample_roadmap_row();
        let milestones = vec![sample_milestone(roadmap.id, 0, true)];
        let adjusted = json!([{
            "milestone_id": Uuid::new_v4(),
            "adjusted_timeline": "Months 7-15",
            "adjustment_reason": "Referencing a milestone that does not exist"
        }]);
        let llm = CannedGenerator(progress_json(adjusted));
        let (scores, participation) = sample_telemetry();

        let err = adapt_payload(
            &llm,
            &roadmap,
            &milestones,
            &scores,
            &participation,
            &sample_profile_row(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_adapt_payload_accepts_empty_adjustments() {
        let roadmap = sample_roadmap_row();
        let milestones = vec![sample_milestone(roadmap.id, 0, false)];
        let llm = CannedGenerator(progress_json(json!([])));
        let (scores, participation) = sample_telemetry();

        let payload = adapt_payload(
            &llm,
            &roadmap,
            &milestones,
            &scores,
            &participation,
            &sample_profile_row(),
        )
        .await
        .unwrap();
        assert!(payload.adjusted_milestones.is_empty());
    }

    #[tokio::test]
    async fn test_adapt_payload_rejects_non_uuid_milestone_reference() {
        let roadmap = sample_roadmap_row();
        let milestones = vec![sample_milestone(roadmap.id, 0, false)];
        let adjusted = json!([{
            "milestone_id": "milestone-one",
            "adjusted_timeline": "later",
            "adjustment_reason": "free-form id from the model"
        }]);
        let llm = CannedGenerator(progress_json(adjusted));
        let (scores, participation) = sample_telemetry();

        let err = adapt_payload(
            &llm,
            &roadmap,
            &milestones,
            &scores,
            &participation,
            &sample_profile_row(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation(_)));
    }

    #[test]
    fn test_validate_adjustments_directly() {
        let known: HashSet<Uuid> = [Uuid::new_v4()].into_iter().collect();
        let known_id = *known.iter().next().unwrap();

        let ok = ProgressPayload {
            progress_summary: String::new(),
            achievement_level: String::new(),
            strengths: vec![],
            areas_for_improvement: vec![],
            adjusted_milestones: vec![AdjustedMilestone {
                milestone_id: known_id,
                adjusted_timeline: "later".to_string(),
                adjustment_reason: "test".to_string(),
            }],
            feedback: String::new(),
            motivation: String::new(),
            next_steps: vec![],
        };
        assert!(validate_adjustments(&ok, &known).is_ok());

        let mut bad = ok.clone();
        bad.adjusted_milestones[0].milestone_id = Uuid::new_v4();
        assert!(validate_adjustments(&bad, &known).is_err());
    }

    #[test]
    fn test_prompt_embeds_milestone_ids() {
        let roadmap = sample_roadmap_row();
        let milestones = vec![sample_milestone(roadmap.id, 0, true)];
        let (scores, participation) = sample_telemetry();
        let prompt = build_progress_prompt(
            &roadmap,
            &milestones,
            &scores,
            &participation,
            &sample_profile_row(),
        )
        .unwrap();
        assert!(prompt.contains(&milestones[0].id.to_string()));
        assert!(prompt.contains("\"questions_asked\": 12"));
    }
}
