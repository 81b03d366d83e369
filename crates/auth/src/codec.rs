//! Credential token codec.
//!
//! Tokens are compact HS256 JWTs over [`Claims`]. Verification is split in
//! two passes so the failure kind is stable:
//! 1. parse header/claims without the signature (`Malformed`),
//! 2. compare `exp` with the current time (`Expired`),
//! 3. check the signature (`InvalidSignature`).
//!
//! An expired token therefore reports `Expired` whatever its signature.

use chrono::{DateTime, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use mitr_core::UserId;

use crate::{AuthConfig, AuthError, Claims, Identity, Role};

/// A freshly issued token plus its expiry (returned to the client at login).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue and verify signed credential tokens.
///
/// The `_at` variants take the clock reading explicitly; the plain variants
/// read `Utc::now()` on every call.
pub trait TokenCodec: Send + Sync {
    fn issue_at(&self, subject: UserId, role: Role, now: DateTime<Utc>) -> Result<IssuedToken, AuthError>;

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AuthError>;

    fn issue(&self, subject: UserId, role: Role) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, role, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.verify_at(token, Utc::now())
    }
}

/// HMAC-SHA256 implementation backed by `jsonwebtoken`.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    unverified: Validation,
    verified: Validation,
    ttl: chrono::Duration,
}

impl Hs256TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        // Expiry is checked by hand against the caller's clock, so the library
        // checks are switched off in both passes.
        let mut verified = Validation::new(Algorithm::HS256);
        verified.validate_exp = false;
        verified.leeway = 0;
        verified.required_spec_claims.clear();

        let mut unverified = verified.clone();
        unverified.insecure_disable_signature_validation();

        Self {
            encoding: EncodingKey::from_secret(config.secret()),
            decoding: DecodingKey::from_secret(config.secret()),
            unverified,
            verified,
            ttl: config.token_ttl(),
        }
    }

    fn decode(&self, token: &str, validation: &Validation) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, validation)
            .map(|data| data.claims)
            .map_err(classify_decode_error)
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue_at(&self, subject: UserId, role: Role, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let claims = Claims::new(subject, role, now, self.ttl)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| AuthError::internal("token expiry out of range"))?;

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::internal(format!("token signing failed: {e}")))?;

        tracing::debug!(subject = %subject, role = %role, %expires_at, "issued token");
        Ok(IssuedToken { token, expires_at })
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let claims = self.decode(token, &self.unverified)?;
        if !claims.has_valid_window() {
            return Err(AuthError::Malformed);
        }
        if claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        self.decode(token, &self.verified)?;
        Ok(claims.identity())
    }
}

fn classify_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthError::InvalidSignature
        }
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject => AuthError::Malformed,
        _ => AuthError::internal(format!("token verification failed: {err}")),
    }
}
