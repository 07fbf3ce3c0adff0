//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::AuthSession;
use crate::domain::dashboard::{DashboardStats, MonthlyProfiles, RelationshipStat};
use crate::domain::moderation::{AccountStatusChange, NewDeletedUser};
use crate::domain::profile::{GenderOption, Profile};
use crate::domain::types::{AccountStatus, AdminEmail, OtpCode, ProfileId, StaffRole};
use crate::models::profile::{ProfileRow, SearchProfileRow, SearchProfilesParams};
use crate::pagination::ListResult;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountReader, AccountWriter, AuthGateway, DashboardReader, ProfileListQuery, ProfileReader,
    ProfileSearchProcedure, ProfileTable, ProfileTableQuery, RecordQuery, RecordReader,
    StaffReader, StorageSigner,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl ProfileSearchProcedure for Repository {
        async fn search_profiles(
            &self,
            params: &SearchProfilesParams,
        ) -> RepositoryResult<Vec<SearchProfileRow>>;
    }

    #[async_trait]
    impl ProfileTable for Repository {
        async fn list_profile_rows(
            &self,
            query: &ProfileTableQuery,
        ) -> RepositoryResult<(usize, Vec<ProfileRow>)>;
        async fn get_profile_row(&self, id: ProfileId) -> RepositoryResult<Option<ProfileRow>>;
    }

    #[async_trait]
    impl ProfileReader for Repository {
        async fn list_profiles(&self, query: &ProfileListQuery) -> RepositoryResult<ListResult<Profile>>;
        async fn get_profile(&self, id: ProfileId) -> RepositoryResult<Profile>;
    }

    #[async_trait]
    impl RecordReader for Repository {
        async fn list_records(
            &self,
            query: &RecordQuery,
        ) -> RepositoryResult<(usize, Vec<serde_json::Value>)>;
    }

    #[async_trait]
    impl AccountReader for Repository {
        async fn get_account_status(&self, user_id: ProfileId) -> RepositoryResult<AccountStatus>;
        async fn list_gender_options(&self) -> RepositoryResult<Vec<GenderOption>>;
        async fn get_profile_gender(&self, user_id: ProfileId) -> RepositoryResult<Option<String>>;
    }

    #[async_trait]
    impl AccountWriter for Repository {
        async fn upsert_account_status(&self, change: &AccountStatusChange) -> RepositoryResult<()>;
        async fn replace_profile_gender(
            &self,
            user_id: ProfileId,
            attribute_id: i64,
        ) -> RepositoryResult<()>;
        async fn record_deleted_user(&self, entry: &NewDeletedUser) -> RepositoryResult<()>;
        async fn delete_user(&self, user_id: ProfileId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl StaffReader for Repository {
        async fn get_staff_role(&self, user_id: ProfileId) -> RepositoryResult<Option<StaffRole>>;
    }

    #[async_trait]
    impl DashboardReader for Repository {
        async fn get_overview(&self) -> RepositoryResult<DashboardStats>;
        async fn list_relationship_stats(&self) -> RepositoryResult<Vec<RelationshipStat>>;
        async fn list_profiles_by_month(&self) -> RepositoryResult<Vec<MonthlyProfiles>>;
    }

    #[async_trait]
    impl StorageSigner for Repository {
        async fn sign_storage_key(&self, storage_key: &str) -> RepositoryResult<String>;
    }

    #[async_trait]
    impl AuthGateway for Repository {
        async fn send_login_code(&self, email: &AdminEmail) -> RepositoryResult<()>;
        async fn verify_login_code(
            &self,
            email: &AdminEmail,
            code: &OtpCode,
        ) -> RepositoryResult<AuthSession>;
        async fn sign_out(&self, access_token: &str) -> RepositoryResult<()>;
    }
}
