//! Account use cases: registration, login and password management.

use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};

use crate::auth::JwtKeys;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Role;
use crate::domain::user::NewUser;
use crate::dto::users::{CurrentUserView, UserView};
use crate::forms::users::{
    ChangePasswordForm, ChangePasswordPayload, SigninForm, SigninPayload, SignupForm,
    SignupPayload,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

pub(crate) fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))
}

pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            log::error!("Stored password hash is malformed: {err}");
            false
        }
    }
}

/// Registers a new account.
pub fn signup<R>(repo: &R, form: SignupForm) -> ServiceResult<UserView>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = SignupPayload::try_from(form)?;

    if repo.get_user_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let new_user = NewUser::new(payload.username, payload.email, password_hash, payload.role);

    let user = repo.create_user(&new_user).map_err(|err| match err {
        RepositoryError::Duplicate(_) => {
            ServiceError::Conflict("User with this email already exists".to_string())
        }
        err => {
            log::error!("Failed to create user: {err}");
            ServiceError::from(err)
        }
    })?;

    log::info!("Registered {} as {}", user.email, user.role);
    Ok(user.into())
}

/// Verifies credentials and issues an access token.
pub fn signin<R>(repo: &R, keys: &JwtKeys, form: SigninForm) -> ServiceResult<String>
where
    R: UserReader + ?Sized,
{
    let payload = SigninPayload::try_from(form)?;

    let user = repo
        .get_user_by_email(&payload.email)?
        .ok_or(ServiceError::NotFound("User"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ServiceError::InvalidCredentials("Invalid credentials"));
    }

    keys.issue(&user).map_err(|err| {
        log::error!("Failed to sign token: {err}");
        ServiceError::Internal(err.to_string())
    })
}

/// Loads the account behind the access token.
pub fn current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CurrentUserView>
where
    R: UserReader + ?Sized,
{
    let account = repo
        .get_user_by_id(user.user_id()?)?
        .ok_or(ServiceError::NotFound("User"))?;
    Ok(UserView::from(account).into())
}

pub fn change_password<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ChangePasswordForm,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = ChangePasswordPayload::try_from(form)?;

    let account = repo
        .get_user_by_id(user.user_id()?)?
        .ok_or(ServiceError::NotFound("User"))?;

    if !verify_password(&payload.current_password, &account.password_hash) {
        return Err(ServiceError::InvalidCredentials(
            "Current password is incorrect",
        ));
    }

    let password_hash = hash_password(&payload.new_password)?;
    repo.update_password_hash(account.id, &password_hash)
        .map_err(|err| {
            log::error!("Failed to update password: {err}");
            ServiceError::from(err)
        })?;

    Ok(())
}

/// Lists every account holding `role`.
pub fn list_by_role<R>(repo: &R, role: Role) -> ServiceResult<Vec<UserView>>
where
    R: UserReader + ?Sized,
{
    let users = repo.list_users_by_role(role)?;
    Ok(users.into_iter().map(UserView::from).collect())
}
