// Cross-cutting prompt fragments shared by every structured-output stage.
// Each stage defines its own prompts.rs alongside it and composes these in.

/// System prompt fragment that enforces JSON-only output.
/// Appended to every stage system prompt that expects a structured payload.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
