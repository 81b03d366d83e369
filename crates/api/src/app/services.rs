//! Service wiring: token gate, user directory, chat backend.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::Utc;
use serde::Serialize;

use mitr_ai::{ChatBackend, GeminiChatBackend};
use mitr_auth::{
    normalize_email, AccountError, AuthError, AuthGate, Hs256TokenCodec, IssuedToken, Registration, Role,
    UserAccount, UserProfile,
};
use mitr_core::{DomainError, UserId};

use crate::config::{AppConfig, BootstrapAdmin};

/// Account storage. The real deployment backs this with a document store.
///
/// `Err` means the store itself failed; an absent account is `Ok(None)`.
pub trait UserDirectory: Send + Sync {
    /// Insert a new account; a taken email is `Conflict`.
    fn insert(&self, account: UserAccount) -> Result<(), AccountError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthError>;
    fn get(&self, id: UserId) -> Result<Option<UserAccount>, AuthError>;
}

/// In-memory directory keyed by normalized email, for tests/dev.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::internal("user directory lock poisoned")
}

impl UserDirectory for InMemoryUserDirectory {
    fn insert(&self, account: UserAccount) -> Result<(), AccountError> {
        let mut map = self.inner.write().map_err(poisoned)?;

        if map.contains_key(&account.email) {
            return Err(DomainError::conflict("email already registered").into());
        }
        map.insert(account.email.clone(), account);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&normalize_email(email)).cloned())
    }

    fn get(&self, id: UserId) -> Result<Option<UserAccount>, AuthError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().find(|a| a.id == id).cloned())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: UserProfile,
}

pub struct AppServices {
    pub gate: AuthGate,
    pub users: Arc<dyn UserDirectory>,
    /// `None` when no chat upstream is configured.
    pub chat: Option<Arc<dyn ChatBackend>>,
}

impl AppServices {
    pub fn new(gate: AuthGate, users: Arc<dyn UserDirectory>, chat: Option<Arc<dyn ChatBackend>>) -> Self {
        Self { gate, users, chat }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let gate = AuthGate::new(Arc::new(Hs256TokenCodec::new(&config.auth)));

        let chat = match &config.gemini {
            Some(gemini) => Some(Arc::new(GeminiChatBackend::new(gemini.clone())?) as Arc<dyn ChatBackend>),
            None => {
                tracing::warn!("GEMINI_API_KEY not set; chat is disabled");
                None
            }
        };

        let services = Self::new(gate, Arc::new(InMemoryUserDirectory::new()), chat);
        if let Some(admin) = &config.bootstrap_admin {
            services.seed_admin(admin)?;
        }
        Ok(services)
    }

    /// Create the configured admin account unless that email already exists.
    pub fn seed_admin(&self, admin: &BootstrapAdmin) -> Result<(), AccountError> {
        if self.users.find_by_email(&admin.email)?.is_some() {
            return Ok(());
        }

        let account = UserAccount::register(
            &Registration {
                name: "Administrator".to_string(),
                email: admin.email.clone(),
                password: admin.password.clone(),
                role: Role::Admin,
            },
            Utc::now(),
        )?;
        tracing::info!(user_id = %account.id, "bootstrap admin created");
        self.users.insert(account)?;
        Ok(())
    }

    /// Self-service registration. Admin accounts cannot be self-created.
    pub fn register(&self, registration: &Registration) -> Result<UserProfile, AccountError> {
        if registration.role == Role::Admin {
            return Err(AuthError::Forbidden { role: Role::Admin }.into());
        }

        let account = UserAccount::register(registration, Utc::now())?;
        let profile = account.profile();
        self.users.insert(account)?;

        tracing::info!(user_id = %profile.id, role = %profile.role, "user registered");
        Ok(profile)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let account = self
            .users
            .find_by_email(email)?
            .ok_or(AuthError::InvalidCredentials)?;
        account.check_password(password)?;

        let token = self.gate.codec().issue(account.id, account.role)?;
        tracing::info!(user_id = %account.id, "login succeeded");

        Ok(LoginOutcome {
            token,
            user: account.profile(),
        })
    }

    pub fn profile(&self, id: UserId) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.users.get(id)?.map(|a| a.profile()))
    }
}
