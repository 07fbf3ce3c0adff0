use actix_web::{Responder, get, web};
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::routes::{json_response, user_repo};
use crate::services::emails::{self as emails_service, PreviewParams};

#[get("/emails/templates")]
pub async fn email_templates(
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(emails_service::list_templates(&user, &repo).await)
}

#[get("/emails/{template}/preview")]
pub async fn preview_email(
    template: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    tera: web::Data<Tera>,
    web::Query(params): web::Query<PreviewParams>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(emails_service::preview_email(&user, &template, params, &tera, &repo).await)
}
