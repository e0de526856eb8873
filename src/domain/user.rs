use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Role, UserEmail, UserId, Username};

/// A registered account. The password hash never leaves the repository and
/// service layers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: UserEmail,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: Username,
    pub email: UserEmail,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    #[must_use]
    pub fn new(username: Username, email: UserEmail, password_hash: String, role: Role) -> Self {
        Self {
            username,
            email,
            password_hash,
            role,
        }
    }
}
