use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::{DataResponse, ListResponse};
use crate::forms::call_logs::CreateCallLogForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::call_logs as call_logs_service;

#[get("/{user_id}")]
pub async fn list_call_logs(
    user_id: web::Path<i32>,
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match call_logs_service::list_call_logs(
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
pub async fn create_call_log(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCallLogForm>,
) -> impl Responder {
    match call_logs_service::create_call_log(repo.get_ref(), &user, form) {
        Ok(log) => HttpResponse::Created().json(DataResponse::new(log)),
        Err(err) => error_response(err),
    }
}
