//! Persisted entity rows for the career guidance pipeline.
//!
//! Lifecycle summary:
//! - `CareerProfileRow` is singleton-replace: at most one row per user.
//! - `CareerMatchRow` and `CareerRoadmapRow` append: regeneration adds rows,
//!   prior rows are retained.
//! - `MilestoneRow.is_completed`/`completed_at` is the only in-place mutation
//!   in the entity graph.
//! - `ProgressUpdateRow` is strictly append-only history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub personality_type: String,
    pub primary_strengths: Vec<String>,
    pub secondary_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub learning_style: String,
    pub work_environment_preference: String,
    pub career_interests: Vec<String>,
    /// `{"technical": [{"skill", "level"}], "soft": [...]}` — levels 1..=10.
    pub skill_summary: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerMatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    /// Order within its generation batch, as returned by the inference call.
    pub position: i32,
    pub career: String,
    pub compatibility_score: i32,
    pub reasoning: String,
    pub key_skills_aligned: Vec<String>,
    pub potential_challenges: Vec<String>,
    pub education_requirements: Vec<String>,
    pub growth_opportunities: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerRoadmapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub career_match_id: Uuid,
    pub career: String,
    pub overview: String,
    pub timeframe: String,
    pub skills_to_acquire: Value,
    pub exams_certifications: Value,
    pub project_ideas: Value,
    pub weekly_plan: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MilestoneRow {
    pub id: Uuid,
    pub roadmap_id: Uuid,
    /// Ordering within the roadmap; the default "next milestone" order.
    pub position: i32,
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub required_skills: Vec<String>,
    pub activities: Vec<String>,
    pub resources: Vec<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressUpdateRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roadmap_id: Uuid,
    pub progress_summary: String,
    pub achievement_level: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    /// `[{"milestone_id", "adjusted_timeline", "adjustment_reason"}]` —
    /// advisory only; milestone rows themselves are never touched.
    pub adjusted_milestones: Value,
    pub feedback: String,
    pub motivation: String,
    pub next_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseRecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roadmap_id: Uuid,
    pub recommended_courses: Value,
    pub recommended_tests: Value,
    pub recommended_sessions: Value,
    pub suggested_learning_path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessageRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_user: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
