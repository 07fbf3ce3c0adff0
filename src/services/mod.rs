pub mod auth;
pub mod dashboard;
pub mod emails;
pub mod errors;
pub mod moderation;
pub mod profiles;
pub mod resources;

pub use errors::{ServiceError, ServiceResult};

use crate::domain::types::{ProfileId, StaffRole};
use crate::models::auth::AuthenticatedUser;
use crate::repository::StaffReader;

/// Resolves the dashboard role of the caller.
///
/// Users without a staff role are rejected with [`ServiceError::Forbidden`].
pub async fn ensure_staff<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<StaffRole>
where
    R: StaffReader + ?Sized,
{
    let user_id: ProfileId = user.user_id().map_err(|_| ServiceError::Unauthorized)?;

    match repo.get_staff_role(user_id).await.map_err(|err| {
        log::error!("Failed to load staff role for {user_id}: {err}");
        err
    })? {
        Some(role) => Ok(role),
        None => {
            log::warn!("User {user_id} has no dashboard role");
            Err(ServiceError::Forbidden)
        }
    }
}

/// Like [`ensure_staff`] but only admins pass.
pub async fn ensure_admin<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: StaffReader + ?Sized,
{
    match ensure_staff(user, repo).await? {
        StaffRole::Admin => Ok(()),
        StaffRole::Moderator => Err(ServiceError::Forbidden),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn staff_roles_pass_and_others_are_forbidden() {
        let user = staff_user();

        let repo = repo_with_role(Some(StaffRole::Moderator));
        assert_eq!(ensure_staff(&user, &repo).await.unwrap(), StaffRole::Moderator);
        assert!(matches!(
            ensure_admin(&user, &repo).await,
            Err(ServiceError::Forbidden)
        ));

        let repo = repo_with_role(None);
        assert!(matches!(
            ensure_staff(&user, &repo).await,
            Err(ServiceError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn malformed_subject_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_role().times(0);
        let mut user = staff_user();
        user.sub = "service-role".to_string();

        assert!(matches!(
            ensure_staff(&user, &repo).await,
            Err(ServiceError::Unauthorized)
        ));
    }
}
