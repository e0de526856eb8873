use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::Role;
use crate::domain::user::User;

/// Account fields shared by every user view. Never includes the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub username: String,
    pub email_id: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl From<User> for AccountView {
    fn from(user: User) -> Self {
        Self {
            username: user.username.into_inner(),
            email_id: user.email.into_inner(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// A user as embedded in lists and populated records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(flatten)]
    pub account: AccountView,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            account: user.into(),
        }
    }
}

/// Body of `GET /users/me`, keyed by `id` instead of `_id`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentUserView {
    pub id: i32,
    #[serde(flatten)]
    pub account: AccountView,
}

impl From<UserView> for CurrentUserView {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id,
            account: view.account,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SalespersonsResponse {
    pub success: bool,
    pub salespersons: Vec<UserView>,
}

#[derive(Debug, Serialize)]
pub struct FieldpersonsResponse {
    pub success: bool,
    pub fieldpersons: Vec<UserView>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{UserEmail, UserId, Username};

    fn user() -> User {
        User {
            id: UserId::new(5).unwrap(),
            username: Username::new("Nila").unwrap(),
            email: UserEmail::new("nila@example.com").unwrap(),
            password_hash: "secret-hash".into(),
            role: Role::Salesperson,
            created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn user_view_uses_underscore_id() {
        let json = serde_json::to_value(UserView::from(user())).unwrap();
        assert_eq!(json["_id"], 5);
        assert_eq!(json["emailId"], "nila@example.com");
        assert!(json.get("id").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn current_user_view_uses_plain_id() {
        let json = serde_json::to_value(CurrentUserView::from(UserView::from(user()))).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["username"], "Nila");
        assert_eq!(json["role"], "salesperson");
        assert!(json.get("_id").is_none());
    }
}
