use std::sync::Arc;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, http::StatusCode, test, web};
use serde_json::json;

use handyplus_admin::configure_routes;
use handyplus_admin::models::config::ServerConfig;
use handyplus_admin::repository::SupabaseRepository;
use handyplus_admin::repository::backend::{SupabaseClient, SupabaseClientOptions};

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 8080,
        secret: "x".repeat(64),
        templates_dir: "templates/**/*".into(),
        // Nothing listens here; none of these requests may reach the backend.
        supabase_url: "http://127.0.0.1:9".into(),
        supabase_api_key: "anon".into(),
        supabase_jwt_secret: "jwt-secret".into(),
        storage_bucket: "images".into(),
        signed_url_ttl_secs: 3600,
        search_batch_size: 1000,
    }
}

macro_rules! init_app {
    () => {{
        let config = server_config();
        let client = SupabaseClient::new(SupabaseClientOptions::from(&config)).unwrap();
        let repo = SupabaseRepository::new(Arc::new(client), config.search_batch_size);
        let key = Key::from(config.secret.as_bytes());

        test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .configure(configure_routes)
                .app_data(web::Data::new(tera::Tera::default()))
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(config)),
        )
        .await
    }};
}

#[actix_web::test]
async fn api_requires_signed_in_user() {
    let app = init_app!();

    for uri in [
        "/api/profiles",
        "/api/profiles/export",
        "/api/profiles/7b3c1d2e-9f1a-4c55-8e21-2a4b5c6d7e8f/details",
        "/api/dashboard",
        "/api/matches",
        "/auth/permissions",
        "/emails/templates",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[actix_web::test]
async fn moderation_requires_signed_in_user() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/profiles/7b3c1d2e-9f1a-4c55-8e21-2a4b5c6d7e8f/status")
        .set_json(json!({ "status": "banned" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn verify_without_requested_code_is_rejected() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/auth/verify")
        .set_json(json!({ "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn login_with_malformed_email_is_rejected() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some());
}
