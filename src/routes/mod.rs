//! HTTP handlers. Each one delegates to a service and maps the outcome to a
//! JSON response.

use actix_multipart::form::MultipartFormConfig;
use actix_web::{HttpRequest, HttpResponse, error, web};

use crate::dto::ErrorResponse;
use crate::services::ServiceError;

pub mod call_logs;
pub mod clients;
pub mod leads;
pub mod meet_logs;
pub mod statistics;
pub mod users;

/// Maps a service failure to its status code and error envelope.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized | ServiceError::InvalidCredentials(_) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(err.to_string()))
        }
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(err.to_string())),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(ErrorResponse::new(message)),
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Server error").with_error(message))
        }
    }
}

fn bad_request(err: impl std::fmt::Display) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    error::InternalError::from_response(err.to_string(), response).into()
}

fn json_error(err: error::JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn query_error(err: error::QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn path_error(err: error::PathError, _: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn multipart_error(err: actix_multipart::MultipartError, _: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

/// Registers extractor configs and every API scope under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(
            MultipartFormConfig::default()
                .total_limit(10 * 1024 * 1024)
                .error_handler(multipart_error),
        )
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/users")
                        .service(users::signup)
                        .service(users::signin)
                        .service(users::me)
                        .service(users::change_password)
                        .service(users::salespersons)
                        .service(users::fieldpersons),
                )
                .service(
                    web::scope("/clients")
                        .service(clients::create_client)
                        .service(clients::bulk_assign)
                        .service(clients::upload_clients)
                        .service(clients::list_clients),
                )
                .service(
                    web::scope("/leads")
                        .service(leads::list_all_leads)
                        .service(leads::create_lead)
                        .service(leads::list_user_leads),
                )
                .service(
                    web::scope("/calllogs")
                        .service(call_logs::create_call_log)
                        .service(call_logs::list_call_logs),
                )
                .service(
                    web::scope("/fieldperson/meetlogs")
                        .service(meet_logs::create_meet_log)
                        .service(meet_logs::list_meet_logs)
                        .service(meet_logs::meet_statistics)
                        .service(meet_logs::get_meet_log),
                )
                .service(web::scope("/statistics").service(statistics::user_statistics)),
        );
}
