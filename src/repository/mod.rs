use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        auth::AuthSession,
        dashboard::{DashboardStats, MonthlyProfiles, RelationshipStat},
        moderation::{AccountStatusChange, NewDeletedUser},
        profile::{GenderOption, Profile},
        resource::Resource,
        types::{AccountStatus, AdminEmail, OtpCode, ProfileId, SortOrder, StaffRole, TypeConstraintError},
    },
    models::profile::{ProfileRow, SearchProfileRow, SearchProfilesParams},
    pagination::{ListResult, Pagination},
    repository::{backend::SupabaseClient, errors::RepositoryResult},
};

pub mod auth;
pub mod backend;
pub mod dashboard;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod moderation;
pub mod profile;
pub mod profile_search;
pub mod record;
pub mod staff;
pub mod storage;

/// Profile columns the list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Firstname,
    Name,
    Birthdate,
    Email,
    AccountStatus,
    GenderValue,
}

impl ProfileSortField {
    pub const fn column(self) -> &'static str {
        match self {
            ProfileSortField::CreatedAt => "created_at",
            ProfileSortField::UpdatedAt => "updated_at",
            ProfileSortField::Firstname => "firstname",
            ProfileSortField::Name => "name",
            ProfileSortField::Birthdate => "birthdate",
            ProfileSortField::Email => "email",
            ProfileSortField::AccountStatus => "account_status",
            ProfileSortField::GenderValue => "gender_value",
        }
    }

    /// Whether ordering needs data joined from another table.
    pub const fn requires_join(self) -> bool {
        matches!(
            self,
            ProfileSortField::Email | ProfileSortField::AccountStatus | ProfileSortField::GenderValue
        )
    }
}

impl std::str::FromStr for ProfileSortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "created_at" => Ok(ProfileSortField::CreatedAt),
            "updated_at" => Ok(ProfileSortField::UpdatedAt),
            "firstname" => Ok(ProfileSortField::Firstname),
            "name" => Ok(ProfileSortField::Name),
            "birthdate" => Ok(ProfileSortField::Birthdate),
            "email" => Ok(ProfileSortField::Email),
            "account_status" => Ok(ProfileSortField::AccountStatus),
            "gender_value" => Ok(ProfileSortField::GenderValue),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSort {
    pub field: ProfileSortField,
    pub order: SortOrder,
}

impl Default for ProfileSort {
    /// Most recent first.
    fn default() -> Self {
        Self {
            field: ProfileSortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFilter {
    pub firstname: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub status: Option<AccountStatus>,
}

/// Filter, sort and page request for the profile list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileListQuery {
    pub pagination: Pagination,
    pub sort: Option<ProfileSort>,
    pub filter: ProfileFilter,
}

/// Keeps only values with visible characters.
fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into().trim().to_string();
    (!value.is_empty()).then_some(value)
}

impl ProfileListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination::new(page, per_page);
        self
    }

    pub fn sort(mut self, field: ProfileSortField, order: SortOrder) -> Self {
        self.sort = Some(ProfileSort { field, order });
        self
    }

    pub fn firstname(mut self, value: impl Into<String>) -> Self {
        self.filter.firstname = non_blank(value);
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.filter.name = non_blank(value);
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.filter.email = non_blank(value);
        self
    }

    pub fn gender(mut self, value: impl Into<String>) -> Self {
        self.filter.gender = non_blank(value);
        self
    }

    pub fn status(mut self, status: AccountStatus) -> Self {
        self.filter.status = Some(status);
        self
    }

    /// Requested ordering, or most recent first.
    pub fn effective_sort(&self) -> ProfileSort {
        self.sort.unwrap_or_default()
    }
}

/// Query the plain `profiles` table can answer on its own columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTableQuery {
    /// Case-insensitive substring match.
    pub firstname: Option<String>,
    /// Case-insensitive substring match.
    pub name: Option<String>,
    pub sort: ProfileSort,
    pub pagination: Pagination,
}

/// Single-table query over one of the browsable resources.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub resource: Resource,
    /// Equality filters on whitelisted columns.
    pub filters: Vec<(String, String)>,
    pub sort: Option<(String, SortOrder)>,
    pub pagination: Option<Pagination>,
}

impl RecordQuery {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            filters: Vec::new(),
            sort: None,
            pagination: None,
        }
    }

    /// Adds an equality filter; columns outside the resource's whitelist are ignored.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        if self.resource.has_column(column) {
            self.filters.push((column.to_string(), value.to_string()));
        } else {
            log::debug!("Ignoring filter on unknown column {}.{column}", self.resource);
        }
        self
    }

    /// Orders by `column`, or by the resource default when the column is unknown.
    pub fn sort(mut self, column: &str, order: SortOrder) -> Self {
        if self.resource.has_column(column) {
            self.sort = Some((column.to_string(), order));
        }
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn effective_sort(&self) -> (String, SortOrder) {
        self.sort.clone().unwrap_or_else(|| {
            let (column, order) = self.resource.default_sort();
            (column.to_string(), order)
        })
    }
}

/// Remote `search_profiles` procedure: joins, filters, sorts and pages
/// profiles server-side.
#[async_trait]
pub trait ProfileSearchProcedure {
    async fn search_profiles(
        &self,
        params: &SearchProfilesParams,
    ) -> RepositoryResult<Vec<SearchProfileRow>>;
}

/// Generic query path over the `profiles` table.
#[async_trait]
pub trait ProfileTable {
    async fn list_profile_rows(
        &self,
        query: &ProfileTableQuery,
    ) -> RepositoryResult<(usize, Vec<ProfileRow>)>;
    async fn get_profile_row(&self, id: ProfileId) -> RepositoryResult<Option<ProfileRow>>;
}

#[async_trait]
pub trait ProfileReader {
    async fn list_profiles(&self, query: &ProfileListQuery) -> RepositoryResult<ListResult<Profile>>;
    async fn get_profile(&self, id: ProfileId) -> RepositoryResult<Profile>;
}

#[async_trait]
pub trait RecordReader {
    /// Returns the total number of matching rows and the requested page.
    async fn list_records(
        &self,
        query: &RecordQuery,
    ) -> RepositoryResult<(usize, Vec<serde_json::Value>)>;
}

#[async_trait]
pub trait AccountReader {
    async fn get_account_status(&self, user_id: ProfileId) -> RepositoryResult<AccountStatus>;
    async fn list_gender_options(&self) -> RepositoryResult<Vec<GenderOption>>;
    async fn get_profile_gender(&self, user_id: ProfileId) -> RepositoryResult<Option<String>>;
}

#[async_trait]
pub trait AccountWriter {
    async fn upsert_account_status(&self, change: &AccountStatusChange) -> RepositoryResult<()>;
    async fn replace_profile_gender(
        &self,
        user_id: ProfileId,
        attribute_id: i64,
    ) -> RepositoryResult<()>;
    async fn record_deleted_user(&self, entry: &NewDeletedUser) -> RepositoryResult<()>;
    /// Removes the auth user and every record owned by it.
    async fn delete_user(&self, user_id: ProfileId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait StaffReader {
    /// Dashboard role of the user, `None` when the user is not staff.
    async fn get_staff_role(&self, user_id: ProfileId) -> RepositoryResult<Option<StaffRole>>;
}

#[async_trait]
pub trait DashboardReader {
    async fn get_overview(&self) -> RepositoryResult<DashboardStats>;
    async fn list_relationship_stats(&self) -> RepositoryResult<Vec<RelationshipStat>>;
    /// Monthly rows, newest month first.
    async fn list_profiles_by_month(&self) -> RepositoryResult<Vec<MonthlyProfiles>>;
}

#[async_trait]
pub trait StorageSigner {
    /// Time-limited URL of a stored object.
    async fn sign_storage_key(&self, storage_key: &str) -> RepositoryResult<String>;
}

#[async_trait]
pub trait AuthGateway {
    async fn send_login_code(&self, email: &AdminEmail) -> RepositoryResult<()>;
    async fn verify_login_code(
        &self,
        email: &AdminEmail,
        code: &OtpCode,
    ) -> RepositoryResult<AuthSession>;
    async fn sign_out(&self, access_token: &str) -> RepositoryResult<()>;
}

/// Repository backed by the hosted Supabase project.
///
/// Requests run with the caller's access token when one is attached, so the
/// backend's row policies apply to staff the same way they apply to the app.
#[derive(Clone)]
pub struct SupabaseRepository {
    client: Arc<SupabaseClient>,
    access_token: Option<String>,
    search_batch_size: usize,
}

impl SupabaseRepository {
    pub fn new(client: Arc<SupabaseClient>, search_batch_size: usize) -> Self {
        Self {
            client,
            access_token: None,
            search_batch_size,
        }
    }

    /// Copy of the repository acting on behalf of the given token.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: Arc::clone(&self.client),
            access_token: Some(token.into()),
            search_batch_size: self.search_batch_size,
        }
    }

    fn client(&self) -> &SupabaseClient {
        &self.client
    }

    fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_only_sort_fields() {
        assert!(ProfileSortField::Email.requires_join());
        assert!(ProfileSortField::AccountStatus.requires_join());
        assert!(ProfileSortField::GenderValue.requires_join());
        assert!(!ProfileSortField::Birthdate.requires_join());
        assert_eq!(
            "gender_value".parse::<ProfileSortField>().unwrap(),
            ProfileSortField::GenderValue
        );
        assert!("password".parse::<ProfileSortField>().is_err());
    }

    #[test]
    fn list_query_defaults_to_recent_first_and_drops_blank_filters() {
        let query = ProfileListQuery::new().firstname("  ").name(" Ana ");
        assert_eq!(query.effective_sort(), ProfileSort::default());
        assert_eq!(query.filter.firstname, None);
        assert_eq!(query.filter.name.as_deref(), Some("Ana"));
        assert_eq!(query.pagination, Pagination::default());
    }

    #[test]
    fn record_query_ignores_unknown_columns() {
        let query = RecordQuery::new(Resource::Messages)
            .eq("room_id", 7)
            .eq("content", "hello")
            .sort("content", SortOrder::Asc);

        assert_eq!(query.filters, vec![("room_id".to_string(), "7".to_string())]);
        assert_eq!(
            query.effective_sort(),
            ("sent_at".to_string(), SortOrder::Desc)
        );
    }
}
