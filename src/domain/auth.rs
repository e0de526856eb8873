//! Identity of the caller as carried by the bearer token.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Role, TypeConstraintError, UserId};
use crate::domain::user::User;

/// Claims of a verified access token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Raw id of the [`User`] the token was issued to.
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Expiration as a unix timestamp in seconds.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Builds claims for `user` that expire at `exp`.
    pub fn for_user(user: &User, exp: usize) -> Self {
        Self {
            id: user.id.get(),
            email: user.email.as_str().to_string(),
            name: user.username.as_str().to_string(),
            role: user.role,
            exp,
        }
    }

    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        UserId::new(self.id)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may act on behalf of anyone; everybody else only on themselves.
    pub fn can_act_for(&self, user_id: UserId) -> bool {
        self.is_admin() || self.id == user_id.get()
    }
}
