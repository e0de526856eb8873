use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::meet_logs::{MeetLogQuery, MeetStatisticsQuery};
use crate::dto::{DataResponse, ListResponse};
use crate::forms::meet_logs::CreateMeetLogForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::meet_logs as meet_logs_service;

#[post("")]
pub async fn create_meet_log(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateMeetLogForm>,
) -> impl Responder {
    match meet_logs_service::create_meet_log(repo.get_ref(), &user, form) {
        Ok(log) => HttpResponse::Created().json(DataResponse::new(log)),
        Err(err) => error_response(err),
    }
}

#[get("")]
pub async fn list_meet_logs(
    params: web::Query<MeetLogQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match meet_logs_service::list_meet_logs(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(ListResponse::from(page)),
        Err(err) => error_response(err),
    }
}

#[get("/statistics")]
pub async fn meet_statistics(
    params: web::Query<MeetStatisticsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match meet_logs_service::meet_statistics(repo.get_ref(), &user, params.into_inner()) {
        Ok(stats) => HttpResponse::Ok().json(DataResponse::new(stats)),
        Err(err) => error_response(err),
    }
}

#[get("/{id}")]
pub async fn get_meet_log(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match meet_logs_service::get_meet_log(repo.get_ref(), &user, id.into_inner()) {
        Ok(log) => HttpResponse::Ok().json(DataResponse::new(log)),
        Err(err) => error_response(err),
    }
}
