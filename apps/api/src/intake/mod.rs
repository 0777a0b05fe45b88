//! Aptitude Intake — the fixed questionnaire preceding profile synthesis.
//!
//! Purely a validation gate: nothing is persisted until the complete answer
//! set is handed to the Profile Synthesizer. `validate_step` backs the
//! per-step UI gate; `validate_all` re-runs every group at submission time.

pub mod handlers;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Field types the questionnaire supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    MultiSelect,
    /// 1 (lowest) to 5 (highest).
    Rating,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionGroup {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [QuestionField],
}

/// The fixed ordered question groups. Order is significant: group index is
/// the step index the UI advances through.
pub fn question_groups() -> &'static [QuestionGroup] {
    QUESTION_GROUPS
}

const QUESTION_GROUPS: &[QuestionGroup] = &[
    QuestionGroup {
        title: "Personal Information",
        description: "Tell us a bit about yourself to help tailor your career recommendations.",
        fields: &[
            QuestionField {
                id: "age",
                label: "Age",
                kind: FieldKind::Number,
                options: &[],
            },
            QuestionField {
                id: "education_level",
                label: "Education Level",
                kind: FieldKind::Select,
                options: &["High School", "Undergraduate", "Graduate", "Post-Graduate"],
            },
            QuestionField {
                id: "current_field",
                label: "Current Field of Study/Work",
                kind: FieldKind::Text,
                options: &[],
            },
            QuestionField {
                id: "goals",
                label: "Career Goals (Short description)",
                kind: FieldKind::Text,
                options: &[],
            },
        ],
    },
    QuestionGroup {
        title: "Interests Assessment",
        description: "Rate your interest level in the following areas from 1 (Not at all interested) to 5 (Very interested).",
        fields: &[
            QuestionField { id: "interest_science", label: "Science & Research", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_tech", label: "Technology & Computing", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_arts", label: "Arts & Design", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_business", label: "Business & Management", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_health", label: "Healthcare & Medicine", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_education", label: "Education & Training", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_engineering", label: "Engineering", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "interest_social", label: "Social Services & Community", kind: FieldKind::Rating, options: &[] },
        ],
    },
    QuestionGroup {
        title: "Skills Assessment",
        description: "Rate your skill level in the following areas from 1 (Beginner) to 5 (Expert).",
        fields: &[
            QuestionField { id: "skill_analytical", label: "Analytical Thinking", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_communication", label: "Communication", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_creativity", label: "Creativity", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_technical", label: "Technical Skills", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_leadership", label: "Leadership", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_teamwork", label: "Teamwork", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_problem_solving", label: "Problem Solving", kind: FieldKind::Rating, options: &[] },
            QuestionField { id: "skill_adaptability", label: "Adaptability", kind: FieldKind::Rating, options: &[] },
        ],
    },
    QuestionGroup {
        title: "Work Style Preferences",
        description: "Select your preferences for work environments and styles.",
        fields: &[
            QuestionField {
                id: "work_environment",
                label: "Preferred Work Environment",
                kind: FieldKind::Select,
                options: &["Remote Work", "Office Environment", "Field Work", "Mixed Environment"],
            },
            QuestionField {
                id: "work_schedule",
                label: "Preferred Work Schedule",
                kind: FieldKind::Select,
                options: &["Regular 9-5", "Flexible Hours", "Project-Based", "Shift Work"],
            },
            QuestionField {
                id: "work_culture",
                label: "Preferred Work Culture",
                kind: FieldKind::MultiSelect,
                options: &["Collaborative", "Independent", "Fast-Paced", "Structured", "Creative", "Innovative"],
            },
        ],
    },
    QuestionGroup {
        title: "Values & Motivations",
        description: "What drives you in your career? Select all that apply.",
        fields: &[
            QuestionField {
                id: "values",
                label: "Career Values",
                kind: FieldKind::MultiSelect,
                options: &[
                    "Financial Security", "Work-Life Balance", "Making a Difference", "Recognition",
                    "Continuous Learning", "Career Advancement", "Job Security", "Creative Freedom",
                ],
            },
            QuestionField {
                id: "motivation",
                label: "Primary Motivation",
                kind: FieldKind::Select,
                options: &[
                    "Helping Others", "Financial Success", "Creative Expression", "Solving Problems",
                    "Building Things", "Leading Teams", "Continuous Learning",
                ],
            },
        ],
    },
];

/// One answer as submitted by the client. Untagged: numbers cover `number`
/// and `rating` fields, strings cover `text`/`select`, arrays cover
/// `multi_select`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Selections(Vec<String>),
}

/// The complete questionnaire answer set, keyed by field id.
pub type AptitudeResponse = HashMap<String, AnswerValue>;

/// A single missing or invalid field in a step.
#[derive(Debug, Clone, Serialize)]
pub struct FieldGap {
    pub field_id: String,
    pub reason: String,
}

/// Result of validating one step: pass/fail plus the offending fields.
#[derive(Debug, Clone, Serialize)]
pub struct StepValidation {
    pub passed: bool,
    pub missing: Vec<FieldGap>,
}

/// Validates one question group against the submitted answers.
/// Every field must have a non-empty value; multi-select fields need at
/// least one selection; ratings must be integers in 1..=5.
pub fn validate_step(
    group_index: usize,
    answers: &AptitudeResponse,
) -> Result<StepValidation, AppError> {
    let group = QUESTION_GROUPS.get(group_index).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown question group index {group_index} (have {})",
            QUESTION_GROUPS.len()
        ))
    })?;

    let mut missing = Vec::new();

    for field in group.fields {
        match check_field(field, answers.get(field.id)) {
            Ok(()) => {}
            Err(reason) => missing.push(FieldGap {
                field_id: field.id.to_string(),
                reason,
            }),
        }
    }

    Ok(StepValidation {
        passed: missing.is_empty(),
        missing,
    })
}

/// Re-validates every group. Used at submission time by the Profile
/// Synthesizer: a partial answer set never reaches the inference call.
pub fn validate_all(answers: &AptitudeResponse) -> Result<(), AppError> {
    let mut missing_ids = Vec::new();

    for index in 0..QUESTION_GROUPS.len() {
        let report = validate_step(index, answers)?;
        missing_ids.extend(report.missing.into_iter().map(|g| g.field_id));
    }

    if missing_ids.is_empty() {
        Ok(())
    } else {
        Err(AppError::IncompleteIntake(missing_ids))
    }
}

fn check_field(field: &QuestionField, answer: Option<&AnswerValue>) -> Result<(), String> {
    let Some(answer) = answer else {
        return Err("no answer provided".to_string());
    };

    match (field.kind, answer) {
        (FieldKind::Text | FieldKind::Select, AnswerValue::Text(s)) => {
            if s.trim().is_empty() {
                Err("answer is empty".to_string())
            } else {
                Ok(())
            }
        }
        (FieldKind::Number, AnswerValue::Number(n)) => {
            if n.is_finite() {
                Ok(())
            } else {
                Err("number is not finite".to_string())
            }
        }
        (FieldKind::Rating, AnswerValue::Number(n)) => {
            if n.fract() != 0.0 {
                Err(format!("rating {n} is not a whole number"))
            } else if !(1.0..=5.0).contains(n) {
                Err(format!("rating {n} is outside 1..=5"))
            } else {
                Ok(())
            }
        }
        (FieldKind::MultiSelect, AnswerValue::Selections(items)) => {
            if items.is_empty() {
                Err("at least one option must be selected".to_string())
            } else {
                Ok(())
            }
        }
        _ => Err(format!(
            "answer has the wrong type for a {:?} field",
            field.kind
        )),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A fully answered questionnaire covering every group.
    pub(crate) fn complete_answers() -> AptitudeResponse {
        let mut answers = AptitudeResponse::new();
        answers.insert("age".into(), AnswerValue::Number(17.0));
        answers.insert("education_level".into(), AnswerValue::Text("High School".into()));
        answers.insert("current_field".into(), AnswerValue::Text("Science stream".into()));
        answers.insert("goals".into(), AnswerValue::Text("Build software that matters".into()));
        for id in [
            "interest_science", "interest_tech", "interest_arts", "interest_business",
            "interest_health", "interest_education", "interest_engineering", "interest_social",
        ] {
            answers.insert(id.into(), AnswerValue::Number(4.0));
        }
        for id in [
            "skill_analytical", "skill_communication", "skill_creativity", "skill_technical",
            "skill_leadership", "skill_teamwork", "skill_problem_solving", "skill_adaptability",
        ] {
            answers.insert(id.into(), AnswerValue::Number(3.0));
        }
        answers.insert("work_environment".into(), AnswerValue::Text("Remote Work".into()));
        answers.insert("work_schedule".into(), AnswerValue::Text("Flexible Hours".into()));
        answers.insert(
            "work_culture".into(),
            AnswerValue::Selections(vec!["Collaborative".into(), "Innovative".into()]),
        );
        answers.insert(
            "values".into(),
            AnswerValue::Selections(vec!["Continuous Learning".into()]),
        );
        answers.insert("motivation".into(), AnswerValue::Text("Solving Problems".into()));
        answers
    }

    #[test]
    fn test_complete_step_passes() {
        let answers = complete_answers();
        for index in 0..question_groups().len() {
            let report = validate_step(index, &answers).unwrap();
            assert!(report.passed, "group {index} failed: {:?}", report.missing);
        }
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut answers = complete_answers();
        answers.remove("goals");
        let report = validate_step(0, &answers).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].field_id, "goals");
    }

    #[test]
    fn test_empty_text_is_reported() {
        let mut answers = complete_answers();
        answers.insert("current_field".into(), AnswerValue::Text("   ".into()));
        let report = validate_step(0, &answers).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing[0].field_id, "current_field");
    }

    #[test]
    fn test_empty_multiselect_is_reported() {
        let mut answers = complete_answers();
        answers.insert("values".into(), AnswerValue::Selections(vec![]));
        let report = validate_step(4, &answers).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing[0].field_id, "values");
    }

    #[test]
    fn test_rating_out_of_range_is_reported() {
        let mut answers = complete_answers();
        answers.insert("interest_tech".into(), AnswerValue::Number(6.0));
        let report = validate_step(1, &answers).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing[0].field_id, "interest_tech");

        answers.insert("interest_tech".into(), AnswerValue::Number(0.0));
        assert!(!validate_step(1, &answers).unwrap().passed);
    }

    #[test]
    fn test_fractional_rating_is_reported() {
        let mut answers = complete_answers();
        answers.insert("skill_teamwork".into(), AnswerValue::Number(3.5));
        let report = validate_step(2, &answers).unwrap();
        assert!(!report.passed);
    }

    #[test]
    fn test_wrong_answer_type_is_reported() {
        let mut answers = complete_answers();
        answers.insert("age".into(), AnswerValue::Text("seventeen".into()));
        let report = validate_step(0, &answers).unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing[0].field_id, "age");
    }

    #[test]
    fn test_unknown_group_index_is_an_error() {
        let answers = complete_answers();
        assert!(validate_step(99, &answers).is_err());
    }

    #[test]
    fn test_validate_all_collects_missing_fields_across_groups() {
        let mut answers = complete_answers();
        answers.remove("age");
        answers.remove("motivation");
        let err = validate_all(&answers).unwrap_err();
        match err {
            AppError::IncompleteIntake(fields) => {
                assert!(fields.contains(&"age".to_string()));
                assert!(fields.contains(&"motivation".to_string()));
                assert_eq!(fields.len(), 2);
            }
            other => panic!("expected IncompleteIntake, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_all_passes_on_complete_answers() {
        assert!(validate_all(&complete_answers()).is_ok());
    }

    #[test]
    fn test_answer_value_untagged_deserialization() {
        let n: AnswerValue = serde_json::from_str("4").unwrap();
        assert!(matches!(n, AnswerValue::Number(v) if v == 4.0));

        let s: AnswerValue = serde_json::from_str("\"Remote Work\"").unwrap();
        assert!(matches!(s, AnswerValue::Text(_)));

        let m: AnswerValue = serde_json::from_str("[\"Collaborative\"]").unwrap();
        assert!(matches!(m, AnswerValue::Selections(v) if v.len() == 1));
    }

    #[test]
    fn test_question_groups_are_stable() {
        let groups = question_groups();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[0].title, "Personal Information");
        assert_eq!(groups[1].fields.len(), 8);
        assert_eq!(groups[2].fields.len(), 8);
    }
}
