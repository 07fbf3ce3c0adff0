use async_trait::async_trait;

use crate::domain::types::{ProfileId, StaffRole};
use crate::models::auth::StaffRoleRow;
use crate::repository::backend::{eq_param, limit_param, select_param};
use crate::repository::errors::RepositoryResult;
use crate::repository::{StaffReader, SupabaseRepository};

/// Maps a stored role to a dashboard role; other roles grant nothing.
fn dashboard_role(user_id: ProfileId, row: Option<StaffRoleRow>) -> Option<StaffRole> {
    let row = row?;
    match row.role.parse() {
        Ok(role) => Some(role),
        Err(_) => {
            log::info!("User {user_id} holds role {:?} without dashboard access", row.role);
            None
        }
    }
}

#[async_trait]
impl StaffReader for SupabaseRepository {
    async fn get_staff_role(&self, user_id: ProfileId) -> RepositoryResult<Option<StaffRole>> {
        let params = vec![
            select_param("role"),
            eq_param("user_id", user_id),
            limit_param(1),
        ];
        let (_, rows) = self
            .client()
            .select::<StaffRoleRow>("staff_roles", &params, false, self.token())
            .await?;

        Ok(dashboard_role(user_id, rows.into_iter().next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_and_moderator_are_dashboard_roles() {
        let id: ProfileId = "7b3c1d2e-9f1a-4c55-8e21-2a4b5c6d7e8f".parse().unwrap();
        let row = |role: &str| Some(StaffRoleRow { role: role.into() });

        assert_eq!(dashboard_role(id, row("admin")), Some(StaffRole::Admin));
        assert_eq!(dashboard_role(id, row("moderator")), Some(StaffRole::Moderator));
        assert_eq!(dashboard_role(id, row("support")), None);
        assert_eq!(dashboard_role(id, None), None);
    }
}
