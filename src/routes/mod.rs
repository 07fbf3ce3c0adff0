use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::services::{ServiceError, ServiceResult};

pub mod auth;
pub mod dashboard;
pub mod emails;
pub mod profiles;
pub mod resources;

/// Maps a service failure onto the HTTP status the dashboard expects.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(body),
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        ServiceError::Internal(_) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Serializes a successful result as JSON.
pub fn json_response<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(&err),
    }
}

/// Repository acting with the caller's access token.
pub fn user_repo(repo: &SupabaseRepository, user: &AuthenticatedUser) -> SupabaseRepository {
    repo.with_access_token(user.access_token.as_str())
}
