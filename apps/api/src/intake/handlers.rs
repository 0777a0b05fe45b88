use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::intake::{question_groups, validate_step, AptitudeResponse, QuestionGroup, StepValidation};

/// GET /api/v1/aptitude/questions
pub async fn handle_get_questions() -> Json<&'static [QuestionGroup]> {
    Json(question_groups())
}

#[derive(Deserialize)]
pub struct ValidateStepRequest {
    pub group_index: usize,
    pub answers: AptitudeResponse,
}

/// POST /api/v1/aptitude/validate
///
/// Returns the structured step report; a failed step is an expected outcome
/// the UI renders inline, not an HTTP error.
pub async fn handle_validate_step(
    Json(req): Json<ValidateStepRequest>,
) -> Result<Json<StepValidation>, AppError> {
    let report = validate_step(req.group_index, &req.answers)?;
    Ok(Json(report))
}
