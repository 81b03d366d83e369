use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};

use mitr_screening::{Questionnaire, TestKind};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct QuestionnaireSummary {
    pub kind: TestKind,
    pub title: &'static str,
    pub question_count: usize,
    pub max_total: u32,
}

impl From<&Questionnaire> for QuestionnaireSummary {
    fn from(q: &Questionnaire) -> Self {
        Self {
            kind: q.kind,
            title: q.title,
            question_count: q.questions.len(),
            max_total: q.max_total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Unparseable JSON bodies become a 400 with our error envelope.
pub fn bad_body(rejection: JsonRejection) -> Response {
    errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}
