use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type covering the pipeline's failure taxonomy.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// A stage either returns a fully schema-conformant entity or one of these;
/// no stage substitutes placeholder data, and no stage retries on its own.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Incomplete intake: {} field(s) missing or invalid", .0.len())]
    IncompleteIntake(Vec<String>),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Invalid career match: {0}")]
    InvalidMatch(String),

    #[error("Roadmap build failed: {0}")]
    RoadmapBuild(String),

    #[error("Inference upstream unavailable: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // IncompleteIntake carries structured field ids for the UI to re-prompt.
        if let AppError::IncompleteIntake(fields) = &self {
            let body = Json(json!({
                "error": {
                    "code": "INCOMPLETE_INTAKE",
                    "message": "All intake questions must be answered before submission",
                    "missing_fields": fields,
                }
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::IncompleteIntake(_) => unreachable!("handled above"),
            AppError::SchemaViolation(msg) => {
                tracing::error!("Schema violation in inference output: {msg}");
                (StatusCode::BAD_GATEWAY, "SCHEMA_VIOLATION", msg.clone())
            }
            AppError::InvalidMatch(msg) => {
                tracing::error!("Invalid match from inference: {msg}");
                (StatusCode::BAD_GATEWAY, "INVALID_MATCH", msg.clone())
            }
            AppError::RoadmapBuild(msg) => {
                tracing::error!("Roadmap build rejected: {msg}");
                (StatusCode::BAD_GATEWAY, "ROADMAP_BUILD_ERROR", msg.clone())
            }
            AppError::Upstream(msg) => {
                tracing::error!("Inference upstream failure: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
