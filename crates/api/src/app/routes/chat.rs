use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use mitr_ai::ChatError;

use crate::app::{dto, errors, services::AppServices};
use crate::authz::{require_role, CHAT_ROLES};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", post(chat))
}

pub async fn chat(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::ChatRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = require_role(&principal, CHAT_ROLES) {
        return errors::auth_error_to_response(&e);
    }

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return dto::bad_body(rejection),
    };
    if body.message.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "empty_message", "No message provided.");
    }

    let Some(backend) = services.chat.as_ref() else {
        return errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "chat_unavailable",
            "Chat is not configured.",
        );
    };

    match backend.reply(&body.message).await {
        Ok(reply) => Json(dto::ChatReply { reply }).into_response(),
        Err(ChatError::EmptyPrompt) => {
            errors::json_error(StatusCode::BAD_REQUEST, "empty_message", "No message provided.")
        }
        Err(e) => errors::internal_error(&e.to_string()),
    }
}
