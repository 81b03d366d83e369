use crate::{AuthError, Identity, Role};

/// Allow the caller iff its role is one of `allowed`.
///
/// - No IO
/// - No panics
/// - An empty `allowed` set denies everyone
pub fn authorize(identity: &Identity, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        tracing::debug!(
            subject = %identity.subject,
            role = %identity.role,
            ?allowed,
            "authorization denied"
        );
        Err(AuthError::Forbidden { role: identity.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitr_core::UserId;

    fn identity(role: Role) -> Identity {
        Identity {
            subject: UserId::new(),
            role,
        }
    }

    #[test]
    fn admin_is_not_implicitly_a_counselor() {
        let result = authorize(&identity(Role::Admin), &[Role::Counselor]);
        assert_eq!(result, Err(AuthError::Forbidden { role: Role::Admin }));
    }

    #[test]
    fn membership_decides_for_every_role_and_subset() {
        // All 8 subsets of the three roles.
        for mask in 0u8..8 {
            let allowed: Vec<Role> = Role::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, r)| r)
                .collect();

            for role in Role::ALL {
                let decision = authorize(&identity(role), &allowed);
                assert_eq!(decision.is_ok(), allowed.contains(&role), "role={role} allowed={allowed:?}");
            }
        }
    }

    #[test]
    fn empty_allow_list_denies() {
        assert!(authorize(&identity(Role::Student), &[]).is_err());
    }
}
