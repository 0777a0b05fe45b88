// Prompt constants for profile synthesis.

/// System prompt for profile synthesis. Composed with
/// `llm_client::prompts::JSON_ONLY_SYSTEM` at call time.
pub const PROFILE_SYSTEM: &str = "You are an expert career counselor with deep knowledge \
    of various professions, required skills, and education paths. \
    Analyze the student's questionnaire answers and create a comprehensive career profile summary.";

/// Profile synthesis prompt template.
/// Replace `{user_info_json}` and `{answers_json}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Analyze these questionnaire answers and create a career profile summary.

Return a JSON object with this EXACT schema (no extra fields):
{
  "personality_type": "string",
  "primary_strengths": ["string"],
  "secondary_strengths": ["string"],
  "areas_for_improvement": ["string"],
  "learning_style": "string",
  "work_environment_preference": "string",
  "career_interests": ["string"],
  "skill_summary": {
    "technical": [
      {"skill": "string", "level": 7}
    ],
    "soft": [
      {"skill": "string", "level": 6}
    ]
  }
}

Every `level` must be an integer from 1 to 10.
`career_interests` must name the interest areas the ratings support, e.g. "Technology & Computing".

User Information:
{user_info_json}

Questionnaire Answers:
{answers_json}"#;
