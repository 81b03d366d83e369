use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{errors, services::AppServices};
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    // A valid token can outlive its account in the in-memory directory.
    let user = match services.profile(principal.user_id()) {
        Ok(Some(user)) => user,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "account no longer exists"),
        Err(e) => return errors::auth_error_to_response(&e),
    };

    Json(serde_json::json!({
        "user_id": principal.user_id().to_string(),
        "role": principal.role(),
        "user": user,
    }))
    .into_response()
}
