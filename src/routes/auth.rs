use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};

use crate::domain::auth::LoginState;
use crate::dto::auth::{LoginStep, Permissions};
use crate::forms::auth::{LoginForm, VerifyCodeForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::SupabaseRepository;
use crate::routes::{error_response, json_response, user_repo};
use crate::services::{ServiceError, auth as auth_service};

/// Session key holding the pending [`LoginState`].
pub const LOGIN_STATE_KEY: &str = "login_state";

fn stored_login_state(session: &Session) -> Option<LoginState> {
    session
        .get::<LoginState>(LOGIN_STATE_KEY)
        .unwrap_or_else(|err| {
            log::warn!("Discarding unreadable login state: {err}");
            None
        })
}

#[post("/auth/login")]
pub async fn login(
    session: Session,
    repo: web::Data<SupabaseRepository>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    let state = match auth_service::request_login_code(form, repo.get_ref()).await {
        Ok(state) => state,
        Err(err) => return error_response(&err),
    };

    let email = state
        .pending_email()
        .map(|email| email.to_string())
        .unwrap_or_default();

    if let Err(err) = session.insert(LOGIN_STATE_KEY, &state) {
        log::error!("Failed to store login state: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(LoginStep::CodeSent { email })
}

#[post("/auth/verify")]
pub async fn verify(
    req: HttpRequest,
    session: Session,
    repo: web::Data<SupabaseRepository>,
    web::Json(form): web::Json<VerifyCodeForm>,
) -> impl Responder {
    let Some(state) = stored_login_state(&session) else {
        return error_response(&ServiceError::Form(
            "no login code was requested".to_string(),
        ));
    };

    let auth_session =
        match auth_service::verify_login_code(Some(&state), form, repo.get_ref()).await {
            Ok(auth_session) => auth_session,
            Err(err) => return error_response(&err),
        };

    let scoped = repo.with_access_token(auth_session.access_token.as_str());
    let (state, role) = match auth_service::authorize_login(state, auth_session, &scoped).await {
        Ok(done) => done,
        Err(err) => {
            session.remove(LOGIN_STATE_KEY);
            return error_response(&err);
        }
    };

    let LoginState::Authenticated {
        session: auth_session,
    } = state
    else {
        return error_response(&ServiceError::Internal(
            "login did not complete".to_string(),
        ));
    };

    if let Err(err) = Identity::login(&req.extensions(), auth_session.access_token) {
        log::error!("Failed to attach identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    session.remove(LOGIN_STATE_KEY);

    log::info!("Staff member {} signed in as {role}", auth_session.user_id);
    HttpResponse::Ok().json(LoginStep::SignedIn {
        email: auth_session.email,
        role,
    })
}

#[post("/auth/logout")]
pub async fn logout(
    user: AuthenticatedUser,
    identity: Identity,
    session: Session,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    if let Err(err) = auth_service::logout(&user, repo.get_ref()).await {
        return error_response(&err);
    }
    identity.logout();
    session.purge();
    HttpResponse::NoContent().finish()
}

#[get("/auth/permissions")]
pub async fn permissions(
    user: AuthenticatedUser,
    repo: web::Data<SupabaseRepository>,
) -> impl Responder {
    let repo = user_repo(&repo, &user);
    json_response(
        auth_service::permissions(&user, &repo)
            .await
            .map(|role| Permissions { role }),
    )
}
