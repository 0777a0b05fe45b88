use serde::{Deserialize, Serialize};

/// Basic facts about the student, collected by the intake UI and passed
/// through on every generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub age: u32,
    pub education_level: String,
    pub current_field: String,
    pub goals: String,
}
