use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{classify, Questionnaire, ScreeningError, Severity, TestKind};

/// Respondent answers: question id -> chosen option value.
///
/// Values stay raw JSON so that anything other than an option value
/// (`-1`, `1.5`, `"2"`, `null`) surfaces as `InvalidAnswerValue` instead of
/// as a body decoding failure.
pub type AnswerSet = BTreeMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub kind: TestKind,
    pub total: u32,
    pub max: u32,
    pub band: Severity,
    pub description: &'static str,
    /// Self-harm item answered above zero; the caller should surface crisis resources.
    pub safety_followup: bool,
}

/// Score a completed questionnaire.
///
/// Missing questions are reported together (in definition order) and take
/// precedence over bad values. Answers for ids the definition does not know
/// are ignored.
pub fn score(definition: &Questionnaire, answers: &AnswerSet) -> Result<ScoreResult, ScreeningError> {
    let mut missing = Vec::new();
    let mut invalid = None;
    let mut total = 0u32;

    for question in definition.questions {
        let Some(raw) = answers.get(question.id) else {
            missing.push(question.id.to_string());
            continue;
        };
        match raw.as_i64().filter(|&v| question.accepts(v)) {
            // Accepted values are option values, all in 0..=3.
            Some(value) => total += value as u32,
            None => {
                invalid.get_or_insert((question.id, raw));
            }
        }
    }

    if !missing.is_empty() {
        return Err(ScreeningError::IncompleteAnswers { missing });
    }
    if let Some((question, value)) = invalid {
        return Err(ScreeningError::InvalidAnswerValue {
            question: question.to_string(),
            value: value.to_string(),
        });
    }

    let safety_followup = definition
        .safety_item
        .and_then(|id| answers.get(id))
        .and_then(JsonValue::as_i64)
        .is_some_and(|v| v > 0);

    let classification = classify(total, definition.kind);
    Ok(ScoreResult {
        kind: definition.kind,
        total,
        max: definition.max_total(),
        band: classification.band,
        description: classification.description,
        safety_followup,
    })
}
