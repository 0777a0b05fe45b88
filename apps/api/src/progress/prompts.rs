// Prompt constants for progress adaptation.

/// System prompt for progress adaptation. Composed with
/// `llm_client::prompts::JSON_ONLY_SYSTEM` at call time.
pub const PROGRESS_SYSTEM: &str = "You are a career progress advisor. \
    Analyze the student's advancement through their roadmap and provide adaptive feedback. \
    Suggest timeline adjustments to existing milestones based on observed performance. \
    Adjustments are advisory: they reference milestones, they do not replace them.";

/// Progress adaptation prompt template.
/// Replace `{roadmap_json}`, `{milestones_json}`, `{completed_json}`,
/// `{test_scores_json}`, `{participation_json}` and `{profile_json}`.
pub const PROGRESS_PROMPT_TEMPLATE: &str = r#"Analyze progress and provide adaptive feedback.

Return a JSON object with this EXACT schema (no extra fields):
{
  "progress_summary": "string",
  "achievement_level": "string",
  "strengths": ["string"],
  "areas_for_improvement": ["string"],
  "adjusted_milestones": [
    {
      "milestone_id": "uuid",
      "adjusted_timeline": "string",
      "adjustment_reason": "string"
    }
  ],
  "feedback": "string",
  "motivation": "string",
  "next_steps": ["string"]
}

Every `milestone_id` MUST be one of the exact `id` values listed in the
milestones below — no exceptions. `adjusted_milestones` may be empty if no
timeline change is warranted.

Roadmap:
{roadmap_json}

Milestones (with ids):
{milestones_json}

Completed Milestones:
{completed_json}

Test Scores:
{test_scores_json}

Participation Metrics:
{participation_json}

Profile Summary:
{profile_json}"#;
