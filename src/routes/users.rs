use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::JwtKeys;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Role;
use crate::dto::users::{FieldpersonsResponse, SalespersonsResponse, TokenResponse};
use crate::dto::{DataResponse, ErrorResponse, MessageResponse};
use crate::forms::users::{ChangePasswordForm, SigninForm, SignupForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, users as users_service};

#[post("/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SignupForm>,
) -> impl Responder {
    match users_service::signup(repo.get_ref(), form) {
        Ok(_) => HttpResponse::Created().json(MessageResponse::new("User created successfully")),
        Err(err) => error_response(err),
    }
}

#[post("/signin")]
pub async fn signin(
    repo: web::Data<DieselRepository>,
    keys: web::Data<JwtKeys>,
    web::Json(form): web::Json<SigninForm>,
) -> impl Responder {
    match users_service::signin(repo.get_ref(), keys.get_ref(), form) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse {
            success: true,
            token,
        }),
        Err(ServiceError::NotFound(_)) => {
            HttpResponse::NotFound().json(ErrorResponse::new("User doesn't exist"))
        }
        Err(err) => error_response(err),
    }
}

#[get("/me")]
pub async fn me(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match users_service::current_user(repo.get_ref(), &user) {
        Ok(view) => HttpResponse::Ok().json(DataResponse::new(view)),
        Err(err) => error_response(err),
    }
}

#[post("/change-password")]
pub async fn change_password(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ChangePasswordForm>,
) -> impl Responder {
    match users_service::change_password(repo.get_ref(), &user, form) {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")),
        Err(err) => error_response(err),
    }
}

#[get("/salespersons")]
pub async fn salespersons(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::list_by_role(repo.get_ref(), Role::Salesperson) {
        Ok(salespersons) if salespersons.is_empty() => {
            HttpResponse::NotFound().json(ErrorResponse::new("No salespersons found"))
        }
        Ok(salespersons) => HttpResponse::Ok().json(SalespersonsResponse {
            success: true,
            salespersons,
        }),
        Err(err) => error_response(err),
    }
}

#[get("/fieldpersons")]
pub async fn fieldpersons(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::list_by_role(repo.get_ref(), Role::Fieldperson) {
        Ok(fieldpersons) => HttpResponse::Ok().json(FieldpersonsResponse {
            success: true,
            fieldpersons,
        }),
        Err(err) => error_response(err),
    }
}
