//! Request gate: bearer extraction + token verification.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{authorize, AuthError, Identity, Role, TokenCodec};

/// Pull the token out of an `Authorization` header value.
///
/// Only the exact `Bearer <token>` shape is accepted; anything else (other
/// schemes, empty token, embedded whitespace) is `MissingCredential`.
pub fn extract_bearer(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredential)?
        .trim();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// Stateless gate in front of protected operations.
#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<dyn TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &dyn TokenCodec {
        self.codec.as_ref()
    }

    /// Authenticate a request from its `Authorization` header value (if any).
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, AuthError> {
        self.authenticate_at(authorization, Utc::now())
    }

    pub fn authenticate_at(&self, authorization: Option<&str>, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingCredential)?;
        let token = extract_bearer(header)?;

        self.codec.verify_at(token, now).inspect_err(|e| {
            tracing::debug!(error = %e, "token rejected");
        })
    }

    pub fn authorize(&self, identity: &Identity, allowed: &[Role]) -> Result<(), AuthError> {
        authorize(identity, allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthConfig, Hs256TokenCodec};
    use chrono::Duration;
    use mitr_core::UserId;

    fn gate() -> AuthGate {
        let config = AuthConfig::new("gate-test-secret-xyz", Duration::hours(24)).unwrap();
        AuthGate::new(Arc::new(Hs256TokenCodec::new(&config)))
    }

    #[test]
    fn bearer_shapes() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer("Bearer   abc  "), Ok("abc"));
        assert_eq!(extract_bearer("bearer abc"), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer("Basic dXNlcjpwYXNz"), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer("Bearer "), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer("Bearer"), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer("Bearer a b"), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer("abc.def.ghi"), Err(AuthError::MissingCredential));
    }

    #[test]
    fn missing_header_is_missing_credential() {
        assert_eq!(gate().authenticate(None), Err(AuthError::MissingCredential));
    }

    #[test]
    fn valid_bearer_yields_identity() {
        let gate = gate();
        let subject = UserId::new();
        let issued = gate.codec().issue(subject, Role::Student).unwrap();
        let header = format!("Bearer {}", issued.token);

        let identity = gate.authenticate(Some(&header)).unwrap();
        assert_eq!(identity, Identity { subject, role: Role::Student });
        assert!(gate.authorize(&identity, &[Role::Student, Role::Counselor]).is_ok());
        assert!(gate.authorize(&identity, &[Role::Admin]).is_err());
    }

    #[test]
    fn codec_failures_propagate_unchanged() {
        let gate = gate();
        let now = Utc::now();
        let issued = gate.codec().issue_at(UserId::new(), Role::Admin, now).unwrap();
        let header = format!("Bearer {}", issued.token);

        assert_eq!(
            gate.authenticate_at(Some(&header), now + Duration::days(2)),
            Err(AuthError::Expired)
        );
        assert_eq!(gate.authenticate(Some("Bearer nonsense")), Err(AuthError::Malformed));
    }
}
