//! User records and the credential check.

use serde::{Deserialize, Serialize};

use campuserp_core::{DomainError, DomainResult, UserId};

use crate::policy::permissions_for_role;
use crate::principal::Principal;
use crate::roles::Role;

/// User account status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

/// One user account.
///
/// Passwords are stored and compared in plaintext, matching the legacy
/// system this replaces. The check lives behind [`authenticate`] so a real
/// credential store can be swapped in without touching callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub roles: Vec<Role>,
    pub status: UserStatus,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            display_name: display_name.into(),
            password: password.into(),
            roles,
            status: UserStatus::Active,
        }
    }
}

/// Check credentials against the user list and resolve a principal.
///
/// Failures are deliberately indistinguishable (unknown user, wrong
/// password, suspended account) and map to the single legacy
/// "invalid username or password" outcome.
pub fn authenticate(users: &[User], username: &str, password: &str) -> DomainResult<Principal> {
    let user = users
        .iter()
        .find(|u| u.username == username && u.password == password && u.status == UserStatus::Active)
        .ok_or(DomainError::Unauthorized)?;

    let mut permissions = Vec::new();
    for role in &user.roles {
        for perm in permissions_for_role(role) {
            if !permissions.contains(&perm) {
                permissions.push(perm);
            }
        }
    }

    tracing::info!(user = %user.username, "login succeeded");
    Ok(Principal {
        user_id: user.id,
        username: user.username.clone(),
        roles: user.roles.clone(),
        permissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;

    fn users() -> Vec<User> {
        let mut suspended = User::new("old", "Former Clerk", "pw", vec![Role::clerk()]);
        suspended.status = UserStatus::Suspended;
        vec![
            User::new("admin", "Administrator", "secret", vec![Role::admin()]),
            User::new("acc", "Accountant", "books", vec![Role::accountant()]),
            suspended,
        ]
    }

    #[test]
    fn valid_credentials_resolve_permissions() {
        let principal = authenticate(&users(), "acc", "books").unwrap();
        assert!(principal
            .permissions
            .contains(&Permission::new("fees.post")));
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        assert_eq!(
            authenticate(&users(), "admin", "wrong").unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn unknown_user_is_unauthorized() {
        assert_eq!(
            authenticate(&users(), "ghost", "secret").unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn suspended_users_cannot_log_in() {
        assert_eq!(
            authenticate(&users(), "old", "pw").unwrap_err(),
            DomainError::Unauthorized
        );
    }
}
