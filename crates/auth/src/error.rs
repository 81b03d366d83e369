use thiserror::Error;

use crate::Role;

/// Authentication/authorization failure kinds.
///
/// Everything except `Internal` is an expected outcome the caller maps to a
/// client error; `Internal` means the server itself is misbehaving.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or malformed bearer credential")]
    MissingCredential,

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("forbidden: role '{role}' is not permitted")]
    Forbidden { role: Role },

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures that mean "who are you?" rather than "not allowed".
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::Malformed
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::InvalidCredentials
        )
    }
}
