use actix_web::{Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::routes::{json_response, user_repo};
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(dashboard_service::load_dashboard(&user, &repo).await)
}
