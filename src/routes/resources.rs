use std::collections::HashMap;

use actix_web::{Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::routes::{json_response, user_repo};
use crate::services::resources as resources_service;

/// Generic list of any browsable table, e.g. `/api/messages?room_id=7`.
#[get("/{resource}")]
pub async fn list_resource(
    resource: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Query(params): web::Query<HashMap<String, String>>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(resources_service::list_resource(&user, &resource, &params, &repo).await)
}
