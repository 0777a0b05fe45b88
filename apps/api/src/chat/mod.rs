//! Advisor Chat — a conversational surface over the persisted profile and
//! roadmap. The only stage whose reply is free text rather than a schema.

pub mod handlers;
pub mod prompts;

use anyhow::anyhow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::chat::prompts::CHAT_SYSTEM;
use crate::errors::AppError;
use crate::llm_client::{PromptMessage, TextGenerator};
use crate::models::career::{CareerProfileRow, CareerRoadmapRow, ChatMessageRow};

const CHAT_TEMPERATURE: f32 = 0.7;

/// Builds the system prompt with whatever profile/roadmap context exists.
/// Context lives in the system prompt so the conversational messages stay
/// strictly user/assistant alternating.
pub fn build_system_prompt(
    profile: Option<&CareerProfileRow>,
    roadmap: Option<&CareerRoadmapRow>,
) -> Result<String, AppError> {
    let mut system = CHAT_SYSTEM.to_string();

    if let Some(profile) = profile {
        let profile_json = serde_json::to_string_pretty(profile)
            .map_err(|e| AppError::Internal(anyhow!("Failed to serialize profile: {e}")))?;
        system.push_str("\n\nStudent profile:\n");
        system.push_str(&profile_json);
    }
    if let Some(roadmap) = roadmap {
        let roadmap_json = serde_json::to_string_pretty(roadmap)
            .map_err(|e| AppError::Internal(anyhow!("Failed to serialize roadmap: {e}")))?;
        system.push_str("\n\nActive roadmap:\n");
        system.push_str(&roadmap_json);
    }

    Ok(system)
}

/// Maps stored history plus the new user message into the prompt sequence.
pub fn build_messages(history: &[ChatMessageRow], message: &str) -> Vec<PromptMessage> {
    let mut messages: Vec<PromptMessage> = history
        .iter()
        .map(|m| {
            if m.is_user {
                PromptMessage::user(m.message.clone())
            } else {
                PromptMessage::assistant(m.message.clone())
            }
        })
        .collect();
    messages.push(PromptMessage::user(message));
    messages
}

/// Sends one chat turn and returns the reply text. Does not persist.
pub async fn chat_reply(
    llm: &dyn TextGenerator,
    history: &[ChatMessageRow],
    profile: Option<&CareerProfileRow>,
    roadmap: Option<&CareerRoadmapRow>,
    message: &str,
) -> Result<String, AppError> {
    let system = build_system_prompt(profile, roadmap)?;
    let messages = build_messages(history, message);
    Ok(llm.generate(&system, &messages, CHAT_TEMPERATURE).await?)
}

pub async fn insert_message(
    pool: &PgPool,
    user_id: Uuid,
    is_user: bool,
    message: &str,
) -> Result<ChatMessageRow, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (id, user_id, is_user, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(is_user)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn chat_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Role;
    use chrono::Utc;

    fn stored(is_user: bool, message: &str) -> ChatMessageRow {
        ChatMessageRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            is_user,
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_messages_maps_roles_and_appends_new_turn() {
        let history = vec![
            stored(true, "What should I learn first?"),
            stored(false, "Start with programming fundamentals."),
        ];
        let messages = build_messages(&history, "How long will that take?");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "How long will that take?");
    }

    #[test]
    fn test_build_messages_with_empty_history() {
        let messages = build_messages(&[], "Hello");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
    }

    #[test]
    fn test_system_prompt_without_context_is_bare() {
        let system = build_system_prompt(None, None).unwrap();
        assert_eq!(system, CHAT_SYSTEM);
    }

    #[test]
    fn test_system_prompt_embeds_profile_context() {
        let profile = crate::matching::tests::sample_profile_row();
        let system = build_system_prompt(Some(&profile), None).unwrap();
        assert!(system.contains("Student profile:"));
        assert!(system.contains("Analytical Builder"));
        assert!(!system.contains("Active roadmap:"));
    }
}
