// Prompt constants for roadmap building.

/// System prompt for roadmap building. Composed with
/// `llm_client::prompts::JSON_ONLY_SYSTEM` at call time.
pub const ROADMAP_SYSTEM: &str = "You are a career development expert. \
    Create a detailed, milestone-based roadmap for the specified career, \
    tailored to the student's profile and current skills.";

/// Roadmap prompt template.
/// Replace `{career}`, `{user_info_json}` and `{profile_json}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a detailed career roadmap.

Return a JSON object with this EXACT schema (no extra fields):
{
  "career": "string",
  "overview": "string",
  "timeframe": "string",
  "milestones": [
    {
      "title": "string",
      "description": "string",
      "timeline": "string",
      "required_skills": ["string"],
      "activities": ["string"],
      "resources": ["string"]
    }
  ],
  "skills_to_acquire": [
    {
      "skill": "string",
      "importance": "High",
      "suggested_resources": ["string"]
    }
  ],
  "exams_certifications": [
    {
      "name": "string",
      "description": "string",
      "timeline": "string",
      "preparation_tips": ["string"]
    }
  ],
  "project_ideas": [
    {
      "title": "string",
      "description": "string",
      "skills": ["string"]
    }
  ],
  "weekly_plan": {
    "focus": "string",
    "activities": ["string"]
  }
}

`importance` must be exactly "High", "Medium" or "Low".
Provide at least 3 milestones, ordered chronologically by increasing timeline.
Every milestone MUST have non-empty `required_skills`, `activities` and `resources`.

Career: {career}

User Information:
{user_info_json}

Profile Summary:
{profile_json}"#;
