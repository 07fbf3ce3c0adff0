//! Two-step email login for staff members.

use crate::domain::auth::{AuthSession, LoginState};
use crate::domain::types::{AdminEmail, OtpCode, StaffRole};
use crate::forms::auth::{LoginForm, VerifyCodeForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuthGateway, StaffReader};
use crate::services::{ServiceError, ServiceResult};

/// Mails a one-time code and starts a pending login.
pub async fn request_login_code<R>(form: LoginForm, repo: &R) -> ServiceResult<LoginState>
where
    R: AuthGateway + ?Sized,
{
    let email = AdminEmail::try_from(form)?;

    repo.send_login_code(&email).await.map_err(|err| {
        log::error!("Failed to send login code to {email}: {err}");
        err
    })?;

    log::info!("Login code sent to {email}");
    Ok(LoginState::awaiting(email))
}

/// Exchanges the code for a backend session.
///
/// Only a pending login can be verified.
pub async fn verify_login_code<R>(
    state: Option<&LoginState>,
    form: VerifyCodeForm,
    repo: &R,
) -> ServiceResult<AuthSession>
where
    R: AuthGateway + ?Sized,
{
    let email = state
        .and_then(LoginState::pending_email)
        .ok_or_else(|| ServiceError::Form("no login code was requested".to_string()))?;
    let code = OtpCode::try_from(form)?;

    repo.verify_login_code(email, &code).await.map_err(|err| {
        log::warn!("Login code rejected for {email}: {err}");
        match err.status() {
            Some(400..=499) => ServiceError::Unauthorized,
            _ => ServiceError::from(err),
        }
    })
}

/// Finishes the login once the session holder is known to be staff.
///
/// `repo` must act with the new session's token. A session without a staff
/// role is signed out again and the login is refused.
pub async fn authorize_login<R>(
    state: LoginState,
    session: AuthSession,
    repo: &R,
) -> ServiceResult<(LoginState, StaffRole)>
where
    R: AuthGateway + StaffReader + ?Sized,
{
    let role = repo.get_staff_role(session.user_id).await.map_err(|err| {
        log::error!("Failed to load staff role for {}: {err}", session.user_id);
        err
    })?;

    let Some(role) = role else {
        log::warn!("Refusing dashboard login for non-staff user {}", session.user_id);
        if let Err(err) = repo.sign_out(&session.access_token).await {
            log::error!("Failed to sign out non-staff session: {err}");
        }
        return Err(ServiceError::Forbidden);
    };

    let state = state
        .complete(session)
        .map_err(|_| ServiceError::Form("login already completed".to_string()))?;

    Ok((state, role))
}

/// Ends the backend session. Failures are logged; the local sign-out
/// proceeds regardless.
pub async fn logout<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: AuthGateway + ?Sized,
{
    if let Err(err) = repo.sign_out(&user.access_token).await {
        log::warn!("Backend sign-out failed for {}: {err}", user.sub);
    }
    Ok(())
}

/// Dashboard role of the caller, `None` for non-staff.
pub async fn permissions<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Option<StaffRole>>
where
    R: StaffReader + ?Sized,
{
    let user_id = user.user_id()?;
    repo.get_staff_role(user_id).await.map_err(|err| {
        log::error!("Failed to load permissions for {user_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{STAFF_ID, staff_user};

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_in: 3600,
            user_id: STAFF_ID.parse().unwrap(),
            email: Some("admin@example.com".into()),
        }
    }

    fn pending() -> LoginState {
        LoginState::awaiting(AdminEmail::new("admin@example.com").unwrap())
    }

    #[tokio::test]
    async fn request_code_starts_pending_login() {
        let mut repo = MockRepository::new();
        repo.expect_send_login_code()
            .withf(|email| email.as_str() == "admin@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let form = LoginForm {
            email: "Admin@Example.com".into(),
        };
        let state = request_login_code(form, &repo).await.unwrap();

        assert_eq!(state, pending());
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_send_login_code().times(0);

        let form = LoginForm {
            email: "admin".into(),
        };
        let result = request_login_code(form, &repo).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn verify_requires_pending_login() {
        let mut repo = MockRepository::new();
        repo.expect_verify_login_code().times(0);
        let form = || VerifyCodeForm {
            code: "123456".into(),
        };

        assert!(matches!(
            verify_login_code(None, form(), &repo).await,
            Err(ServiceError::Form(_))
        ));

        let done = LoginState::Authenticated { session: session() };
        assert!(matches!(
            verify_login_code(Some(&done), form(), &repo).await,
            Err(ServiceError::Form(_))
        ));
    }

    #[tokio::test]
    async fn rejected_code_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_verify_login_code().times(1).returning(|_, _| {
            Err(RepositoryError::Backend {
                status: 403,
                code: Some("otp_expired".into()),
                message: "Token has expired or is invalid".into(),
            })
        });

        let form = VerifyCodeForm {
            code: "123456".into(),
        };
        let result = verify_login_code(Some(&pending()), form, &repo).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn staff_login_is_authenticated() {
        let mut repo = MockRepository::new();
        repo.expect_verify_login_code()
            .withf(|email, code| email.as_str() == "admin@example.com" && code.as_str() == "123456")
            .times(1)
            .returning(|_, _| Ok(session()));
        repo.expect_get_staff_role()
            .times(1)
            .returning(|_| Ok(Some(StaffRole::Admin)));
        repo.expect_sign_out().times(0);

        let state = pending();
        let form = VerifyCodeForm {
            code: "123456".into(),
        };
        let session = verify_login_code(Some(&state), form, &repo).await.unwrap();
        let (state, role) = authorize_login(state, session, &repo).await.unwrap();

        assert_eq!(role, StaffRole::Admin);
        assert!(matches!(state, LoginState::Authenticated { .. }));
    }

    #[tokio::test]
    async fn non_staff_login_is_signed_out_and_forbidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_role().times(1).returning(|_| Ok(None));
        repo.expect_sign_out()
            .withf(|token| token == "access")
            .times(1)
            .returning(|_| Ok(()));

        let result = authorize_login(pending(), session(), &repo).await;

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn logout_ignores_backend_failure() {
        let mut repo = MockRepository::new();
        repo.expect_sign_out()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));

        assert!(logout(&staff_user(), &repo).await.is_ok());
    }

    #[tokio::test]
    async fn permissions_are_null_for_non_staff() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_role().returning(|_| Ok(None));

        assert_eq!(permissions(&staff_user(), &repo).await.unwrap(), None);
    }
}
