//! Access token handling and the [`AuthenticatedUser`] request extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode, web};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::dto::ErrorResponse;
use crate::models::config::ServerConfig;

/// HS256 keys and token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expires_secs)
    }

    /// Signs a token for `user` expiring after the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = Utc::now().timestamp().max(0) as u64 + self.ttl_secs;
        let claims = AuthenticatedUser::for_user(user, exp as usize);
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<AuthenticatedUser>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Authentication is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or(AuthError::NotConfigured)?;
    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    keys.verify(token).map_err(|err| {
        log::debug!("Rejected access token: {err}");
        AuthError::InvalidToken
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{Role, UserEmail, UserId, Username};

    fn user() -> User {
        User {
            id: UserId::new(7).unwrap(),
            username: Username::new("Farah").unwrap(),
            email: UserEmail::new("farah@example.com").unwrap(),
            password_hash: String::new(),
            role: Role::Fieldperson,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let keys = JwtKeys::new(b"test-secret", 3600);
        let token = keys.issue(&user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.role, Role::Fieldperson);
        assert_eq!(claims.email, "farah@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtKeys::new(b"one", 3600).issue(&user()).unwrap();
        assert!(JwtKeys::new(b"two", 3600).verify(&token).is_err());
    }

    #[test]
    fn extractor_requires_bearer_header() {
        let keys = JwtKeys::new(b"test-secret", 3600);
        let token = keys.issue(&user()).unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(keys.clone()))
            .to_http_request();
        assert!(matches!(authenticate(&req), Err(AuthError::MissingToken)));

        let req = TestRequest::default()
            .app_data(web::Data::new(keys.clone()))
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_http_request();
        assert!(matches!(authenticate(&req), Err(AuthError::InvalidToken)));

        let req = TestRequest::default()
            .app_data(web::Data::new(keys))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();
        assert_eq!(authenticate(&req).unwrap().id, 7);
    }
}
