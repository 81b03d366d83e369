use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mitr_auth::{AccountError, AuthError};
use mitr_core::DomainError;
use mitr_screening::ScreeningError;

pub fn auth_error_to_response(err: &AuthError) -> Response {
    match err {
        AuthError::MissingCredential => unauthorized("missing_credential", err),
        AuthError::Malformed => unauthorized("malformed_token", err),
        AuthError::InvalidSignature => unauthorized("invalid_signature", err),
        AuthError::Expired => unauthorized("token_expired", err),
        AuthError::InvalidCredentials => unauthorized("invalid_credentials", err),
        AuthError::Forbidden { .. } => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        AuthError::Internal(msg) => internal_error(msg),
    }
}

pub fn domain_error_to_response(err: &DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg.clone()),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg.clone()),
    }
}

pub fn account_error_to_response(err: &AccountError) -> Response {
    match err {
        AccountError::Domain(e) => domain_error_to_response(e),
        AccountError::Auth(e) => auth_error_to_response(e),
    }
}

pub fn screening_error_to_response(err: &ScreeningError) -> Response {
    match err {
        ScreeningError::IncompleteAnswers { .. } => {
            json_error(StatusCode::BAD_REQUEST, "incomplete_answers", err.to_string())
        }
        ScreeningError::InvalidAnswerValue { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_answer_value", err.to_string())
        }
        ScreeningError::UnknownTest(_) => json_error(StatusCode::NOT_FOUND, "unknown_test", err.to_string()),
    }
}

/// 500 with a generic message; the detail only goes to the log.
pub fn internal_error(detail: &str) -> Response {
    tracing::error!(error = %detail, "internal error");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Server error: Please try again later.",
    )
}

fn unauthorized(code: &'static str, err: &AuthError) -> Response {
    let mut res = json_error(StatusCode::UNAUTHORIZED, code, err.to_string());
    res.headers_mut()
        .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
    res
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
