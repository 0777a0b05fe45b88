// Prompt constants for career match generation.

/// System prompt for match generation. Composed with
/// `llm_client::prompts::JSON_ONLY_SYSTEM` at call time.
pub const MATCH_SYSTEM: &str = "You are a career matching expert. \
    Analyze the student profile and generate suitable career matches. \
    For each career match, provide a compatibility score (0-100), reasoning, and key insights. \
    Scores must reflect the overlap between the profile's skills/interests and the career's demands: \
    a stronger overlap must never score lower than a weaker one.";

/// Match generation prompt template.
/// Replace `{user_info_json}` and `{profile_json}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Generate career matches for this student profile.

Return a JSON object with this EXACT schema (no extra fields):
{
  "career_matches": [
    {
      "career": "string",
      "compatibility_score": 85,
      "reasoning": "string",
      "key_skills_aligned": ["string"],
      "potential_challenges": ["string"],
      "education_requirements": ["string"],
      "growth_opportunities": "string"
    }
  ]
}

Every `compatibility_score` must be an integer from 0 to 100.
Order matches from strongest to weakest fit. Return at least 3 matches.

User Information:
{user_info_json}

Profile Summary:
{profile_json}"#;
