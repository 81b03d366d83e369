//! `mitr-core`: shared domain primitives.
//!
//! Nothing in here knows about HTTP, tokens, or questionnaires.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
