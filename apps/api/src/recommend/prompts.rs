// Prompt constants for course recommendations.

/// System prompt for platform resource recommendations. Composed with
/// `llm_client::prompts::JSON_ONLY_SYSTEM` at call time.
pub const RECOMMEND_SYSTEM: &str = "You are a learning advisor. \
    Recommend courses, tests and sessions from the platform catalogue that align with the \
    student's chosen career path and roadmap. Focus on resources that help achieve the \
    next milestones in the roadmap. Only recommend resources present in the catalogue.";

/// Recommendation prompt template.
/// Replace `{career}`, `{profile_json}`, `{roadmap_json}`, `{milestones_json}`
/// and `{catalogue_json}` before sending.
pub const RECOMMEND_PROMPT_TEMPLATE: &str = r#"Recommend platform resources for this student.

Return a JSON object with this EXACT schema (no extra fields):
{
  "recommended_courses": [
    {"name": "string", "relevance": "string", "aligned_milestone": "string", "priority": "High"}
  ],
  "recommended_tests": [
    {"name": "string", "relevance": "string"}
  ],
  "recommended_sessions": [
    {"name": "string", "relevance": "string"}
  ],
  "suggested_learning_path": "string"
}

`priority` must be "High", "Medium" or "Low" when present.

Career: {career}

Profile Summary:
{profile_json}

Roadmap:
{roadmap_json}

Milestones:
{milestones_json}

Available Platform Catalogue:
{catalogue_json}"#;
