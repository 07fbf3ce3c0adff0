use async_trait::async_trait;

use crate::domain::dashboard::{DashboardStats, MonthlyProfiles, RelationshipStat};
use crate::domain::types::SortOrder;
use crate::repository::backend::{limit_param, order_param, select_param};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DashboardReader, SupabaseRepository};

#[async_trait]
impl DashboardReader for SupabaseRepository {
    async fn get_overview(&self) -> RepositoryResult<DashboardStats> {
        let params = vec![select_param("*"), limit_param(1)];
        let (_, rows) = self
            .client()
            .select::<DashboardStats>("admin_dashboard_overview_cached", &params, false, self.token())
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| RepositoryError::NotFound("dashboard overview".to_string()))
    }

    async fn list_relationship_stats(&self) -> RepositoryResult<Vec<RelationshipStat>> {
        let params = vec![select_param("*")];
        let (_, rows) = self
            .client()
            .select("admin_relationship_stats", &params, false, self.token())
            .await?;
        Ok(rows)
    }

    async fn list_profiles_by_month(&self) -> RepositoryResult<Vec<MonthlyProfiles>> {
        let params = vec![select_param("*"), order_param("month", SortOrder::Desc)];
        let (_, rows) = self
            .client()
            .select("admin_profiles_by_month", &params, false, self.token())
            .await?;
        Ok(rows)
    }
}
