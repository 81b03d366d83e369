//! Route-level role policy.
//!
//! Handlers call [`require_role`] before doing any work; the policy tables
//! below are the single place that says who may do what.

use mitr_auth::{authorize, AuthError, Role};

use crate::context::PrincipalContext;

/// Taking a screening questionnaire.
pub const SCREENING_ROLES: &[Role] = &[Role::Student];

/// Talking to the support chatbot.
pub const CHAT_ROLES: &[Role] = &[Role::Student];

pub fn require_role(principal: &PrincipalContext, allowed: &[Role]) -> Result<(), AuthError> {
    authorize(principal.identity(), allowed)
}
