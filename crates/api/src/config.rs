//! Process configuration, read once at start-up.

use std::net::SocketAddr;

use anyhow::{bail, Context};
use chrono::Duration;

use mitr_ai::GeminiConfig;
use mitr_auth::AuthConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Admin account created at start-up (admins cannot self-register).
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    /// `None` disables the chat route.
    pub gemini: Option<GeminiConfig>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the environment).
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("MITR_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("MITR_BIND_ADDR is not a socket address")?;

        let secret = var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let ttl_hours = match var("TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("TOKEN_TTL_HOURS is not an integer: {raw}"))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        let ttl = Duration::try_hours(ttl_hours).context("TOKEN_TTL_HOURS is out of range")?;
        let auth = AuthConfig::new(secret.into_bytes(), ttl)?;

        let gemini = var("GEMINI_API_KEY").map(|key| {
            let mut config = GeminiConfig::new(key);
            if let Some(endpoint) = var("GEMINI_API_URL") {
                config.endpoint = endpoint;
            }
            config
        });

        let bootstrap_admin = match (
            var("MITR_BOOTSTRAP_ADMIN_EMAIL"),
            var("MITR_BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => bail!("MITR_BOOTSTRAP_ADMIN_EMAIL and MITR_BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            bind_addr,
            auth,
            gemini,
            bootstrap_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "0123456789abcdef")])).unwrap();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.auth.token_ttl(), Duration::hours(24));
        assert!(config.gemini.is_none());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn secret_is_required() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn short_secret_and_bad_ttl_are_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("JWT_SECRET", "short")])).is_err());
        assert!(
            AppConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "0123456789abcdef"),
                ("TOKEN_TTL_HOURS", "0"),
            ]))
            .is_err()
        );
        assert!(
            AppConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "0123456789abcdef"),
                ("TOKEN_TTL_HOURS", "a day"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn oversized_ttl_fails_at_start_up() {
        let err = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "0123456789abcdef"),
            ("TOKEN_TTL_HOURS", "3000000000"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("must not exceed"), "{err}");
    }

    #[test]
    fn optional_sections() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "0123456789abcdef"),
            ("TOKEN_TTL_HOURS", "2"),
            ("MITR_BIND_ADDR", "127.0.0.1:9000"),
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_API_URL", "http://localhost:9999/generate"),
            ("MITR_BOOTSTRAP_ADMIN_EMAIL", "root@mitr.test"),
            ("MITR_BOOTSTRAP_ADMIN_PASSWORD", "change-me-now"),
        ]))
        .unwrap();

        assert_eq!(config.auth.token_ttl(), Duration::hours(2));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.gemini.unwrap().endpoint, "http://localhost:9999/generate");
        assert_eq!(config.bootstrap_admin.unwrap().email, "root@mitr.test");
    }

    #[test]
    fn half_configured_admin_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "0123456789abcdef"),
            ("MITR_BOOTSTRAP_ADMIN_EMAIL", "root@mitr.test"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("set together"));
    }
}
