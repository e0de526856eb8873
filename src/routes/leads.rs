use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::{DataResponse, ListResponse};
use crate::forms::leads::CreateLeadForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::leads as leads_service;

#[get("")]
pub async fn list_all_leads(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match leads_service::list_all_leads(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(ListResponse::from(page)),
        Err(err) => error_response(err),
    }
}

#[get("/{user_id}")]
pub async fn list_user_leads(
    user_id: web::Path<i32>,
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match leads_service::list_user_leads(
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
pub async fn create_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateLeadForm>,
) -> impl Responder {
    match leads_service::create_lead(repo.get_ref(), &user, form) {
        Ok(lead) => HttpResponse::Created().json(DataResponse::new(lead)),
        Err(err) => error_response(err),
    }
}
