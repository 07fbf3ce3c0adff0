use crate::dto::dashboard::{ChartSlice, DashboardData};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{DashboardReader, StaffReader};
use crate::services::{ServiceError, ServiceResult, ensure_staff};

/// Loads the three dashboard views.
///
/// Any failing view fails the whole page with its message.
pub async fn load_dashboard<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<DashboardData>
where
    R: DashboardReader + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let stats = repo.get_overview().await.map_err(|err| {
        log::error!("Failed to load dashboard overview: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    let relationship_stats = repo.list_relationship_stats().await.map_err(|err| {
        log::error!("Failed to load relationship stats: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    let mut profiles_by_month = repo.list_profiles_by_month().await.map_err(|err| {
        log::error!("Failed to load profiles by month: {err}");
        ServiceError::Internal(err.to_string())
    })?;
    profiles_by_month.reverse();

    let gender_distribution = stats
        .gender_distribution()
        .into_iter()
        .map(|(name, value)| ChartSlice { name, value })
        .collect();

    Ok(DashboardData {
        stats,
        gender_distribution,
        relationship_stats,
        profiles_by_month,
    })
}
