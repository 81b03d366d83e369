use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use mitr_screening::{score, AnswerSet, TestKind};

use crate::app::{dto, errors};
use crate::authz::{require_role, SCREENING_ROLES};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_screenings))
        .route("/:kind", get(get_screening))
        .route("/:kind/score", post(score_screening))
}

pub async fn list_screenings() -> impl IntoResponse {
    let items: Vec<dto::QuestionnaireSummary> = TestKind::ALL
        .iter()
        .map(|kind| dto::QuestionnaireSummary::from(kind.questionnaire()))
        .collect();
    Json(serde_json::json!({ "items": items }))
}

pub async fn get_screening(Path(kind): Path<String>) -> axum::response::Response {
    match kind.parse::<TestKind>() {
        Ok(kind) => Json(kind.questionnaire()).into_response(),
        Err(e) => errors::screening_error_to_response(&e),
    }
}

pub async fn score_screening(
    Extension(principal): Extension<PrincipalContext>,
    Path(kind): Path<String>,
    body: Result<Json<AnswerSet>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = require_role(&principal, SCREENING_ROLES) {
        return errors::auth_error_to_response(&e);
    }

    let kind = match kind.parse::<TestKind>() {
        Ok(kind) => kind,
        Err(e) => return errors::screening_error_to_response(&e),
    };
    let Json(answers) = match body {
        Ok(body) => body,
        Err(rejection) => return dto::bad_body(rejection),
    };

    match score(kind.questionnaire(), &answers) {
        Ok(result) => {
            tracing::info!(
                user_id = %principal.user_id(),
                kind = %kind,
                total = result.total,
                band = %result.band.label(),
                "screening scored"
            );
            if result.safety_followup {
                tracing::warn!(user_id = %principal.user_id(), "screening flagged for safety follow-up");
            }
            Json(result).into_response()
        }
        Err(e) => errors::screening_error_to_response(&e),
    }
}
