//! Use cases behind the HTTP routes.
//!
//! Services are generic over the repository traits they need so they can be
//! exercised with the mock repository in unit tests.

use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{Role, TypeConstraintError, UserId};
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod call_logs;
pub mod clients;
pub mod leads;
pub mod meet_logs;
pub mod statistics;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Access denied")]
    Unauthorized,

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Record"),
            RepositoryError::Duplicate(message) => ServiceError::Conflict(message),
            RepositoryError::MissingReference(_) => ServiceError::NotFound("Referenced record"),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless the user holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: Role) -> ServiceResult<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Lets admins through, everybody else only for their own records.
pub fn ensure_self_or_admin(user: &AuthenticatedUser, user_id: UserId) -> ServiceResult<()> {
    if user.can_act_for(user_id) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::auth::AuthenticatedUser;
    use crate::domain::client::Client;
    use crate::domain::types::{
        AssigneeRole, ClientId, ClientName, Location, PhoneNumber, Role, UserEmail, UserId,
        Username,
    };
    use crate::domain::user::User;

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap()
    }

    pub fn auth_user(id: i32, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            role,
            exp: usize::MAX,
        }
    }

    pub fn user(id: i32, role: Role) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(format!("User {id}")).unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            password_hash: String::new(),
            role,
            created_at: timestamp(),
        }
    }

    pub fn client(id: i32, assigned_to: i32) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: ClientName::new(format!("Client {id}")).unwrap(),
            phone: PhoneNumber::new(format!("55500{id}")).unwrap(),
            location: Some(Location::new("Pune").unwrap()),
            assigned_to: Some(UserId::new(assigned_to).unwrap()),
            assigned_role: Some(AssigneeRole::Salesperson),
            created_at: timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::auth_user;

    #[test]
    fn self_or_admin_rule() {
        let own = UserId::new(4).unwrap();
        let other = UserId::new(5).unwrap();
        assert!(ensure_self_or_admin(&auth_user(4, Role::Salesperson), own).is_ok());
        assert!(matches!(
            ensure_self_or_admin(&auth_user(4, Role::Fieldperson), other),
            Err(ServiceError::Unauthorized)
        ));
        assert!(ensure_self_or_admin(&auth_user(1, Role::Admin), other).is_ok());
    }

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::Duplicate("phone".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConnectionError("down".into())),
            ServiceError::Internal(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::MissingReference("fk".into())),
            ServiceError::NotFound(_)
        ));
    }
}
