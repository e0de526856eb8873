use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::DataResponse;
use crate::dto::statistics::StatisticsQuery;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::statistics as statistics_service;

#[get("/{user_id}")]
pub async fn user_statistics(
    user_id: web::Path<i32>,
    params: web::Query<StatisticsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match statistics_service::user_statistics(
        repo.get_ref(),
        &user,
        user_id.into_inner(),
        params.into_inner(),
    ) {
        Ok(stats) => HttpResponse::Ok().json(DataResponse::new(stats)),
        Err(err) => error_response(err),
    }
}
