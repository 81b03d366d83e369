use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use mitr_core::UserId;

use crate::{AuthError, Role};

/// Claims carried inside a credential token.
///
/// Times are whole seconds since the Unix epoch, as in registered JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / account identifier.
    pub sub: UserId,

    /// Role granted at registration.
    pub role: Role,

    /// Issued-at.
    pub iat: i64,

    /// Expiry.
    pub exp: i64,
}

impl Claims {
    /// Fails with `Internal` when `issued_at + ttl` leaves chrono's range.
    pub fn new(sub: UserId, role: Role, issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::internal("token expiry out of range"))?;

        Ok(Self {
            sub,
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// `exp` must lie strictly after `iat`.
    pub fn has_valid_window(&self) -> bool {
        self.exp > self.iat
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn identity(&self) -> Identity {
        Identity {
            subject: self.sub,
            role: self.role,
        }
    }
}

/// Authenticated caller, as decoded from a verified token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: UserId,
    pub role: Role,
}
