use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::moderation::{DeleteProfileForm, GenderForm, StatusForm};
use crate::forms::profiles::ProfileListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::routes::{error_response, json_response, user_repo};
use crate::services::{moderation as moderation_service, profiles as profiles_service};

#[get("/profiles")]
pub async fn list_profiles(
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Query(params): web::Query<ProfileListParams>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(profiles_service::list_profiles(&user, params, &repo).await)
}

#[get("/profiles/export")]
pub async fn export_profiles(
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Query(params): web::Query<ProfileListParams>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    match profiles_service::export_profiles(&user, params, &repo).await {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition::attachment("profiles.csv"))
            .body(csv),
        Err(err) => error_response(&err),
    }
}

#[get("/profiles/{id}")]
pub async fn show_profile(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(profiles_service::get_profile(&user, &id, &repo).await)
}

#[get("/profiles/{id}/details")]
pub async fn profile_details(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(profiles_service::profile_details(&user, &id, &repo).await)
}

#[post("/profiles/{id}/status")]
pub async fn change_status(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Json(form): web::Json<StatusForm>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(
        moderation_service::change_status(&user, &id, form, &repo)
            .await
            .map(|status| serde_json::json!({ "status": status })),
    )
}

#[post("/profiles/{id}/gender")]
pub async fn change_gender(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Json(form): web::Json<GenderForm>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(
        moderation_service::change_gender(&user, &id, form, &repo)
            .await
            .map(|gender| serde_json::json!({ "gender": gender })),
    )
}

#[post("/profiles/{id}/delete")]
pub async fn delete_profile(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
    web::Json(form): web::Json<DeleteProfileForm>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    match moderation_service::delete_profile(&user, &id, form, &repo).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
