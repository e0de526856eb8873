use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::Role;
use crate::dto::clients::AssignmentResponse;
use crate::dto::{DataResponse, ListResponse};
use crate::forms::assign::{AssignClientsForm, AssignClientsPayload, UploadClientsForm};
use crate::forms::clients::CreateClientForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, clients as clients_service, ensure_role};

#[get("/{user_id}")]
pub async fn list_clients(
    user_id: web::Path<i32>,
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match clients_service::list_assigned_clients(
        repo.get_ref(),
        &user,
        user_id.into_inner(),
        params.into_inner(),
    ) {
        Ok(page) => HttpResponse::Ok().json(ListResponse::from(page)),
        Err(err) => error_response(err),
    }
}

#[post("")]
pub async fn create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateClientForm>,
) -> impl Responder {
    match clients_service::create_client(repo.get_ref(), &user, form) {
        Ok(client) => HttpResponse::Created().json(DataResponse::new(client)),
        Err(err) => error_response(err),
    }
}

#[post("/bulk")]
pub async fn bulk_assign(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AssignClientsForm>,
) -> impl Responder {
    if let Err(err) = ensure_role(&user, Role::Admin) {
        return error_response(err);
    }

    let payload = match AssignClientsPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return error_response(ServiceError::from(err)),
    };

    match clients_service::assign_clients(repo.get_ref(), &user, payload) {
        Ok(report) => HttpResponse::Ok().json(AssignmentResponse::from(report)),
        Err(err) => error_response(err),
    }
}

#[post("/upload")]
pub async fn upload_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadClientsForm>,
) -> impl Responder {
    if let Err(err) = ensure_role(&user, Role::Admin) {
        return error_response(err);
    }

    let payload = match form.parse() {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("Failed to parse uploaded clients: {err}");
            return error_response(ServiceError::from(err));
        }
    };

    match clients_service::assign_clients(repo.get_ref(), &user, payload) {
        Ok(report) => HttpResponse::Ok().json(AssignmentResponse::from(report)),
        Err(err) => error_response(err),
    }
}
