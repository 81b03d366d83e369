//! Registered accounts and the login credential check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mitr_core::{DomainError, UserId};

use crate::password::{hash_password, verify_password};
use crate::{AuthError, Role};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Registration request as submitted by a new user.
#[derive(Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl core::fmt::Debug for Registration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Stored account record.
#[derive(Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    password_hash: String,
}

/// Client-safe view of an account (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Emails compare case-insensitively; this is the canonical stored form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserAccount {
    /// Validate a registration and hash its password.
    ///
    /// Role policy (who may register as what) is the caller's decision.
    pub fn register(registration: &Registration, now: DateTime<Utc>) -> Result<Self, AccountError> {
        let name = registration.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty").into());
        }

        let email = normalize_email(&registration.email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format").into());
        }

        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .into());
        }

        Ok(Self {
            id: UserId::new(),
            name: name.to_string(),
            email,
            role: registration.role,
            created_at: now,
            password_hash: hash_password(&registration.password)?,
        })
    }

    /// Check a login password. Mismatch is `InvalidCredentials`.
    pub fn check_password(&self, password: &str) -> Result<(), AuthError> {
        if verify_password(password, &self.password_hash)? {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

impl core::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            name: "  Asha Rao ".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Student,
        }
    }

    #[test]
    fn register_normalizes_and_hashes() {
        let account = UserAccount::register(&registration(" Asha@Example.COM ", "longenough"), Utc::now()).unwrap();

        assert_eq!(account.name, "Asha Rao");
        assert_eq!(account.email, "asha@example.com");
        assert_eq!(account.role, Role::Student);
        assert!(account.check_password("longenough").is_ok());
        assert_eq!(account.check_password("wrong-pass"), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn register_rejects_bad_input() {
        let now = Utc::now();
        let cases = [
            registration("no-at-sign", "longenough"),
            registration("", "longenough"),
            registration("a@b.c", "short"),
            Registration {
                name: "   ".to_string(),
                ..registration("a@b.c", "longenough")
            },
        ];

        for case in cases {
            let err = UserAccount::register(&case, now).unwrap_err();
            assert!(matches!(err, AccountError::Domain(DomainError::Validation(_))), "{case:?}");
        }
    }

    #[test]
    fn debug_never_shows_secrets() {
        let reg = registration("a@b.c", "hunter2hunter2");
        assert!(!format!("{reg:?}").contains("hunter2"));

        let account = UserAccount::register(&reg, Utc::now()).unwrap();
        assert!(!format!("{account:?}").contains("argon2"));
    }
}
