//! Moderation actions on a member account.

use chrono::Utc;
use validator::Validate;

use crate::domain::moderation::{AccountStatusChange, NewDeletedUser};
use crate::domain::types::{AccountStatus, ProfileId};
use crate::forms::FormError;
use crate::forms::moderation::{DeleteProfileForm, DeleteProfilePayload, GenderForm, StatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AccountReader, AccountWriter, ProfileReader, StaffReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin, ensure_staff};

fn parse_profile_id(raw: &str) -> ServiceResult<ProfileId> {
    raw.parse()
        .map_err(|_| ServiceError::NotFound(format!("profile {raw}")))
}

/// Sets the account status of a member.
pub async fn change_status<R>(
    user: &AuthenticatedUser,
    id: &str,
    form: StatusForm,
    repo: &R,
) -> ServiceResult<AccountStatus>
where
    R: AccountWriter + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let user_id = parse_profile_id(id)?;
    let status = AccountStatus::try_from(form)?;
    let change = AccountStatusChange::by_staff(user_id, status, user.user_id()?);

    repo.upsert_account_status(&change).await.map_err(|err| {
        log::error!("Failed to set status of {user_id} to {status}: {err}");
        err
    })?;

    log::info!("{} set status of {user_id} to {status}", user.sub);
    Ok(status)
}

/// Replaces the gender attribute of a member.
pub async fn change_gender<R>(
    user: &AuthenticatedUser,
    id: &str,
    form: GenderForm,
    repo: &R,
) -> ServiceResult<String>
where
    R: AccountReader + AccountWriter + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let user_id = parse_profile_id(id)?;
    form.validate().map_err(FormError::from)?;
    let wanted = form.gender.trim();

    let options = repo.list_gender_options().await?;
    let option = options
        .into_iter()
        .find(|option| option.value == wanted)
        .ok_or(FormError::InvalidGender)?;

    repo.replace_profile_gender(user_id, option.id)
        .await
        .map_err(|err| {
            log::error!("Failed to set gender of {user_id}: {err}");
            err
        })?;

    log::info!("{} set gender of {user_id} to {}", user.sub, option.value);
    Ok(option.value)
}

/// Permanently removes a banned account.
///
/// The `users_deleted` entry is written before the account is removed.
pub async fn delete_profile<R>(
    user: &AuthenticatedUser,
    id: &str,
    form: DeleteProfileForm,
    repo: &R,
) -> ServiceResult<()>
where
    R: ProfileReader + AccountReader + AccountWriter + StaffReader + ?Sized,
{
    ensure_admin(user, repo).await?;

    let user_id = parse_profile_id(id)?;

    let status = repo.get_account_status(user_id).await?;
    if status != AccountStatus::Banned {
        log::warn!("Refusing to delete {user_id} with status {status}");
        return Err(ServiceError::Conflict(
            "the account must be banned before it can be deleted".to_string(),
        ));
    }

    let payload = DeleteProfilePayload::try_from(form)?;
    let profile = repo.get_profile(user_id).await?;

    let entry = NewDeletedUser {
        user_id,
        email: profile.email.as_available().cloned().flatten(),
        firstname: profile.firstname,
        deletion_reason: payload.reason,
        deletion_details: payload.details.map(|note| note.into_inner()),
        deleted_at: Utc::now(),
    };

    repo.record_deleted_user(&entry).await.map_err(|err| {
        log::error!("Failed to record deletion of {user_id}: {err}");
        err
    })?;

    repo.delete_user(user_id).await.map_err(|err| {
        log::error!("Failed to delete account {user_id}: {err}");
        err
    })?;

    log::info!(
        "{} deleted account {user_id} ({})",
        user.sub,
        entry.deletion_reason
    );
    Ok(())
}
