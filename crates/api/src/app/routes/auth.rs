use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use mitr_auth::Registration;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Registration>, JsonRejection>,
) -> axum::response::Response {
    let Json(registration) = match body {
        Ok(body) => body,
        Err(rejection) => return dto::bad_body(rejection),
    };

    match services.register(&registration) {
        Ok(user) => (StatusCode::CREATED, Json(serde_json::json!({ "user": user }))).into_response(),
        Err(e) => errors::account_error_to_response(&e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return dto::bad_body(rejection),
    };

    match services.login(&body.email, &body.password) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::auth_error_to_response(&e),
    }
}
