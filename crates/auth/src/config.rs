use chrono::Duration;
use thiserror::Error;

/// Shortest HMAC secret accepted at start-up.
pub const MIN_SECRET_LEN: usize = 16;

/// Longest token lifetime accepted at start-up.
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing secret must be at least {MIN_SECRET_LEN} bytes (got {0})")]
    SecretTooShort(usize),

    #[error("token ttl must be positive")]
    NonPositiveTtl,

    #[error("token ttl must not exceed {MAX_TOKEN_TTL_DAYS} days")]
    TtlTooLarge,
}

/// Token signing configuration, fixed for the life of the process.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(secret.len()));
        }
        if token_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl);
        }
        if token_ttl > Duration::days(MAX_TOKEN_TTL_DAYS) {
            return Err(ConfigError::TtlTooLarge);
        }
        Ok(Self { secret, token_ttl })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

// The secret must never reach logs.
impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
