#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::SupabaseRepository;
#[cfg(feature = "server")]
use crate::repository::backend::{SupabaseClient, SupabaseClientOptions};

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // One HTTP client shared by every request to the backend.
    let client = SupabaseClient::new(SupabaseClientOptions::from(&server_config))
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    let repo = SupabaseRepository::new(Arc::new(client), server_config.search_batch_size);

    let secret_key = Key::from(server_config.secret.as_bytes());

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving the dashboard API on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.supabase_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Registers every route; specific `/api` paths come before the generic
/// resource list.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use crate::routes::{auth, dashboard, emails, profiles, resources};

    cfg.service(auth::login)
        .service(auth::verify)
        .service(auth::logout)
        .service(auth::permissions)
        .service(emails::email_templates)
        .service(emails::preview_email)
        .service(
            web::scope("/api")
                .service(profiles::list_profiles)
                .service(profiles::export_profiles)
                .service(profiles::show_profile)
                .service(profiles::profile_details)
                .service(profiles::change_status)
                .service(profiles::change_gender)
                .service(profiles::delete_profile)
                .service(dashboard::show_dashboard)
                .service(resources::list_resource),
        );
}
