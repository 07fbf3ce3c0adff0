use async_trait::async_trait;

use crate::domain::auth::AuthSession;
use crate::domain::types::{AdminEmail, OtpCode};
use crate::models::auth::{OtpRequest, SessionResponse, VerifyOtpRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuthGateway, SupabaseRepository};

#[async_trait]
impl AuthGateway for SupabaseRepository {
    async fn send_login_code(&self, email: &AdminEmail) -> RepositoryResult<()> {
        let body = OtpRequest {
            email: email.as_str(),
            create_user: false,
        };
        self.client().auth_post("otp", &body, None).await
    }

    async fn verify_login_code(
        &self,
        email: &AdminEmail,
        code: &OtpCode,
    ) -> RepositoryResult<AuthSession> {
        let body = VerifyOtpRequest {
            kind: "email",
            email: email.as_str(),
            token: code.as_str(),
        };
        let session: SessionResponse = self.client().auth_json("verify", &body, None).await?;
        Ok(session.into())
    }

    async fn sign_out(&self, access_token: &str) -> RepositoryResult<()> {
        self.client()
            .auth_post("logout", &serde_json::json!({}), Some(access_token))
            .await
    }
}
