use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use mitr_auth::{AuthError, AuthGate};

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub gate: AuthGate,
}

pub async fn auth_middleware(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let identity = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MissingCredential))
        .transpose()
        .and_then(|header| state.gate.authenticate(header));

    let identity = match identity {
        Ok(identity) => identity,
        Err(e) => return errors::auth_error_to_response(&e),
    };

    req.extensions_mut().insert(PrincipalContext::new(identity));
    next.run(req).await
}
