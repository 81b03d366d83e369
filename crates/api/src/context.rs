use mitr_auth::{Identity, Role};
use mitr_core::UserId;

/// Authenticated caller for a request (inserted by the auth middleware).
///
/// Immutable for the life of the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    identity: Identity,
}

impl PrincipalContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> UserId {
        self.identity.subject
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}
