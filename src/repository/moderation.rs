use async_trait::async_trait;

use crate::domain::moderation::{AccountStatusChange, NewDeletedUser};
use crate::domain::profile::{GENDER_ATTRIBUTE_IDS, GenderOption};
use crate::domain::types::{AccountStatus, ProfileId, SortOrder};
use crate::models::moderation::{
    AccountStatusRow, DeleteUserRequest, NewProfileAttribute, ProfileAttributeRow,
};
use crate::models::profile::parse_account_status;
use crate::repository::backend::{eq_param, in_param, limit_param, order_param, select_param};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AccountReader, AccountWriter, SupabaseRepository};

const ACCOUNT_STATUS_TABLE: &str = "user_account_status";
const PROFILE_ATTRIBUTES_TABLE: &str = "profile_attributes";
const DELETE_USER_FUNCTION: &str = "delete-user";

#[async_trait]
impl AccountReader for SupabaseRepository {
    async fn get_account_status(&self, user_id: ProfileId) -> RepositoryResult<AccountStatus> {
        let params = vec![
            select_param("status"),
            eq_param("user_id", user_id),
            limit_param(1),
        ];
        let (_, rows) = self
            .client()
            .select::<AccountStatusRow>(ACCOUNT_STATUS_TABLE, &params, false, self.token())
            .await?;

        let stored = rows.into_iter().next().and_then(|row| row.status);
        Ok(parse_account_status(user_id, stored.as_deref()))
    }

    async fn list_gender_options(&self) -> RepositoryResult<Vec<GenderOption>> {
        let params = vec![
            select_param("id,value"),
            eq_param("category", "gender"),
            eq_param("is_active", true),
            order_param("id", SortOrder::Asc),
        ];
        let (_, options) = self
            .client()
            .select("types_attributes", &params, false, self.token())
            .await?;
        Ok(options)
    }

    async fn get_profile_gender(&self, user_id: ProfileId) -> RepositoryResult<Option<String>> {
        let params = vec![
            select_param("attribute_id,types_attributes(value)"),
            eq_param("user_id", user_id),
            in_param("attribute_id", &GENDER_ATTRIBUTE_IDS),
            limit_param(1),
        ];
        let (_, rows) = self
            .client()
            .select::<ProfileAttributeRow>(PROFILE_ATTRIBUTES_TABLE, &params, false, self.token())
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.types_attributes)
            .map(|attribute| attribute.value))
    }
}

#[async_trait]
impl AccountWriter for SupabaseRepository {
    async fn upsert_account_status(&self, change: &AccountStatusChange) -> RepositoryResult<()> {
        self.client()
            .upsert(ACCOUNT_STATUS_TABLE, change, "user_id", self.token())
            .await
    }

    async fn replace_profile_gender(
        &self,
        user_id: ProfileId,
        attribute_id: i64,
    ) -> RepositoryResult<()> {
        let params = vec![
            eq_param("user_id", user_id),
            in_param("attribute_id", &GENDER_ATTRIBUTE_IDS),
        ];
        self.client()
            .delete(PROFILE_ATTRIBUTES_TABLE, &params, self.token())
            .await?;

        let attribute = NewProfileAttribute {
            user_id,
            attribute_id,
        };
        self.client()
            .insert(PROFILE_ATTRIBUTES_TABLE, &attribute, self.token())
            .await
    }

    async fn record_deleted_user(&self, entry: &NewDeletedUser) -> RepositoryResult<()> {
        self.client()
            .insert("users_deleted", entry, self.token())
            .await
    }

    async fn delete_user(&self, user_id: ProfileId) -> RepositoryResult<()> {
        self.client()
            .invoke_function(DELETE_USER_FUNCTION, &DeleteUserRequest { user_id }, self.token())
            .await
    }
}
