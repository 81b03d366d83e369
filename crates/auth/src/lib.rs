//! `mitr-auth`: token issuing/verification and role gating.
//!
//! No HTTP or storage types here: the crate sees header
//! values and account records, never requests or databases.

pub mod account;
pub mod authorize;
pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod gate;
pub mod password;
pub mod roles;

pub use account::{normalize_email, AccountError, Registration, UserAccount, UserProfile, MIN_PASSWORD_LEN};
pub use authorize::authorize;
pub use claims::{Claims, Identity};
pub use codec::{Hs256TokenCodec, IssuedToken, TokenCodec};
pub use config::{AuthConfig, ConfigError, MAX_TOKEN_TTL_DAYS, MIN_SECRET_LEN};
pub use error::AuthError;
pub use gate::{extract_bearer, AuthGate};
pub use roles::Role;
