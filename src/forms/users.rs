//! Account forms: signup, signin and password change.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Role, UserEmail, Username};
use crate::forms::{FormError, missing_fields, present};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub username: Option<String>,
    #[validate(email)]
    pub email_id: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub struct SignupPayload {
    pub username: Username,
    pub email: UserEmail,
    pub password: String,
    pub role: Role,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let (Some(username), Some(email), Some(password), Some(role)) = (
            present(&form.username),
            present(&form.email_id),
            present(&form.password),
            present(&form.role),
        ) else {
            return Err(missing_fields(&[
                ("username", present(&form.username).is_some()),
                ("emailId", present(&form.email_id).is_some()),
                ("password", present(&form.password).is_some()),
                ("role", present(&form.role).is_some()),
            ]));
        };

        form.validate()?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        Ok(Self {
            username: Username::new(username)?,
            email: UserEmail::new(email)?,
            password: password.to_string(),
            role: role.parse()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninForm {
    pub email_id: Option<String>,
    pub password: Option<String>,
}

pub struct SigninPayload {
    pub email: UserEmail,
    pub password: String,
}

impl TryFrom<SigninForm> for SigninPayload {
    type Error = FormError;

    fn try_from(form: SigninForm) -> Result<Self, Self::Error> {
        let (Some(email), Some(password)) = (present(&form.email_id), present(&form.password))
        else {
            return Err(missing_fields(&[
                ("emailId", present(&form.email_id).is_some()),
                ("password", present(&form.password).is_some()),
            ]));
        };

        Ok(Self {
            email: UserEmail::new(email)?,
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

pub struct ChangePasswordPayload {
    pub current_password: String,
    pub new_password: String,
}

impl TryFrom<ChangePasswordForm> for ChangePasswordPayload {
    type Error = FormError;

    fn try_from(form: ChangePasswordForm) -> Result<Self, Self::Error> {
        let (Some(current), Some(new), Some(confirm)) = (
            present(&form.current_password),
            present(&form.new_password),
            present(&form.confirm_password),
        ) else {
            return Err(missing_fields(&[
                ("currentPassword", present(&form.current_password).is_some()),
                ("newPassword", present(&form.new_password).is_some()),
                ("confirmPassword", present(&form.confirm_password).is_some()),
            ]));
        };

        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if new != confirm {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_form() -> SignupForm {
        SignupForm {
            username: Some("Asha".into()),
            email_id: Some("Asha@Example.com".into()),
            password: Some("supersecret".into()),
            role: Some("fieldperson".into()),
        }
    }

    #[test]
    fn signup_form_to_payload() {
        let payload = SignupPayload::try_from(signup_form()).unwrap();
        assert_eq!(payload.email.as_str(), "asha@example.com");
        assert_eq!(payload.role, Role::Fieldperson);
    }

    #[test]
    fn signup_reports_missing_fields() {
        let form = SignupForm {
            password: Some("  ".into()),
            role: None,
            ..signup_form()
        };
        let err = SignupPayload::try_from(form).err().unwrap();
        assert_eq!(err.to_string(), "Missing required fields: password, role");
    }

    #[test]
    fn signup_rejects_short_password_and_bad_role() {
        let form = SignupForm {
            password: Some("short".into()),
            ..signup_form()
        };
        assert!(matches!(
            SignupPayload::try_from(form),
            Err(FormError::PasswordTooShort(8))
        ));

        let form = SignupForm {
            role: Some("manager".into()),
            ..signup_form()
        };
        assert!(matches!(
            SignupPayload::try_from(form),
            Err(FormError::InvalidValue(_))
        ));
    }

    #[test]
    fn signup_rejects_invalid_email() {
        let form = SignupForm {
            email_id: Some("nobody".into()),
            ..signup_form()
        };
        assert!(matches!(
            SignupPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn change_password_checks() {
        let form = ChangePasswordForm {
            current_password: Some("old-password".into()),
            new_password: Some("new-password".into()),
            confirm_password: Some("new-passw0rd".into()),
        };
        assert!(matches!(
            ChangePasswordPayload::try_from(form),
            Err(FormError::PasswordMismatch)
        ));

        let form = ChangePasswordForm {
            current_password: Some("old-password".into()),
            new_password: Some("short".into()),
            confirm_password: Some("short".into()),
        };
        assert!(matches!(
            ChangePasswordPayload::try_from(form),
            Err(FormError::PasswordTooShort(_))
        ));

        let form = ChangePasswordForm::default();
        assert!(matches!(
            ChangePasswordPayload::try_from(form),
            Err(FormError::MissingFields(_))
        ));
    }
}
