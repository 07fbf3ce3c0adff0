//! Payloads exchanged with the authentication service and the request
//! extractor built on top of its access tokens.

use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthSession;
use crate::domain::types::{ProfileId, TypeConstraintError};

/// Body of `POST /auth/v1/otp`.
#[derive(Debug, Serialize)]
pub struct OtpRequest<'a> {
    pub email: &'a str,
    /// Staff accounts are provisioned up front; never sign new users up.
    pub create_user: bool,
}

/// Body of `POST /auth/v1/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub email: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SessionUser {
    pub id: ProfileId,
    pub email: Option<String>,
}

/// Session returned after a successful code verification.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

impl From<SessionResponse> for AuthSession {
    fn from(response: SessionResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            user_id: response.user.id,
            email: response.user.email,
        }
    }
}

/// Row of `staff_roles` when only the role is selected.
#[derive(Debug, Deserialize)]
pub struct StaffRoleRow {
    pub role: String,
}

/// Claims carried by backend access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<String>,
}

/// Staff member identified by the access token stored in the identity cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
    /// Raw token, forwarded so the backend applies the caller's row policies.
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Result<ProfileId, TypeConstraintError> {
        self.sub.parse()
    }
}

#[cfg(feature = "server")]
mod extractor {
    use std::future::{Ready, ready};

    use actix_identity::IdentityExt;
    use actix_web::dev::Payload;
    use actix_web::{FromRequest, HttpRequest, web};
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    use super::{AccessClaims, AuthenticatedUser};
    use crate::models::config::ServerConfig;

    /// Audience the auth service puts on tokens of signed-in users.
    const TOKEN_AUDIENCE: &str = "authenticated";

    impl AuthenticatedUser {
        /// Validates an HS256 access token and extracts the caller.
        pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
            let mut validation = Validation::new(Algorithm::HS256);
            validation.set_audience(&[TOKEN_AUDIENCE]);

            let data = decode::<AccessClaims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &validation,
            )?;

            Ok(Self {
                sub: data.claims.sub,
                email: data.claims.email,
                exp: data.claims.exp,
                access_token: token.to_string(),
            })
        }
    }

    impl FromRequest for AuthenticatedUser {
        type Error = actix_web::Error;
        type Future = Ready<Result<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
            ready(extract(req))
        }
    }

    fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
        let token = req
            .get_identity()
            .and_then(|identity| identity.id())
            .map_err(|_| actix_web::error::ErrorUnauthorized("Not signed in"))?;

        let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
            log::error!("ServerConfig is not registered as app data");
            actix_web::error::ErrorInternalServerError("Server misconfigured")
        })?;

        AuthenticatedUser::from_token(&token, &config.supabase_jwt_secret).map_err(|err| {
            log::warn!("Rejected access token: {err}");
            actix_web::error::ErrorUnauthorized("Session expired")
        })
    }
}
