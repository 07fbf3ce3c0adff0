//! Profile list and lookup on top of the `search_profiles` procedure.
//!
//! The plain `profiles` table cannot filter or sort on data living in other
//! tables (auth email, account status, gender attribute), so listing goes
//! through the procedure first. When the procedure call fails, the list is
//! answered from the table alone with the joined fields marked unavailable.

use crate::domain::profile::Profile;
use crate::domain::types::ProfileId;
use crate::models::profile::{SearchProfileRow, SearchProfilesParams};
use crate::pagination::{ListResult, Pagination};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ProfileListQuery, ProfileSearchProcedure, ProfileSort, ProfileTable, ProfileTableQuery,
};

/// Rows requested per call while looking a profile up by id.
pub const DEFAULT_SEARCH_BATCH_SIZE: usize = 1000;

/// Name of the remote procedure.
pub const SEARCH_PROCEDURE: &str = "search_profiles";

/// Procedure arguments for one page of `query`.
pub fn search_params(query: &ProfileListQuery) -> SearchProfilesParams {
    let sort = query.effective_sort();
    SearchProfilesParams {
        search_firstname: query.filter.firstname.clone(),
        search_name: query.filter.name.clone(),
        search_email: query.filter.email.clone(),
        filter_gender: query.filter.gender.clone(),
        filter_status: query.filter.status,
        sort_field: sort.field.column().to_string(),
        sort_order: sort.order,
        page_limit: query.pagination.limit(),
        page_offset: query.pagination.offset(),
    }
}

/// Unfiltered, most-recent-first batch starting at `offset`.
fn scan_params(batch_size: usize, offset: usize) -> SearchProfilesParams {
    let sort = ProfileSort::default();
    SearchProfilesParams {
        search_firstname: None,
        search_name: None,
        search_email: None,
        filter_gender: None,
        filter_status: None,
        sort_field: sort.field.column().to_string(),
        sort_order: sort.order,
        page_limit: batch_size,
        page_offset: offset,
    }
}

/// Part of `query` the `profiles` table can answer by itself.
///
/// Email, gender and status filters are dropped; a sort on a joined field is
/// replaced by the default ordering.
pub fn table_query(query: &ProfileListQuery) -> ProfileTableQuery {
    if query.filter.email.is_some() || query.filter.gender.is_some() || query.filter.status.is_some()
    {
        log::debug!("Dropping email, gender and status filters for the profiles table query");
    }

    let sort = match query.sort {
        Some(sort) if !sort.field.requires_join() => sort,
        _ => ProfileSort::default(),
    };

    ProfileTableQuery {
        firstname: query.filter.firstname.clone(),
        name: query.filter.name.clone(),
        sort,
        pagination: query.pagination,
    }
}

/// Converts a page of procedure rows, moving `total_count` out of the records.
fn into_list(rows: Vec<SearchProfileRow>, pagination: &Pagination) -> ListResult<Profile> {
    let total = rows.first().map(SearchProfileRow::total).unwrap_or(0);
    let data = rows
        .into_iter()
        .take(pagination.limit())
        .map(Profile::from)
        .collect();
    ListResult::new(data, total)
}

/// Profile list and by-id lookup over a backend exposing both the search
/// procedure and the plain table.
pub struct ProfileSearch<'a, B: ?Sized> {
    backend: &'a B,
    batch_size: usize,
}

impl<'a, B> ProfileSearch<'a, B>
where
    B: ProfileSearchProcedure + ProfileTable + Sync + ?Sized,
{
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            batch_size: DEFAULT_SEARCH_BATCH_SIZE,
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Lists profiles through the procedure, falling back to the table.
    ///
    /// Only an error from the fallback query reaches the caller.
    pub async fn list(&self, query: &ProfileListQuery) -> RepositoryResult<ListResult<Profile>> {
        match self.backend.search_profiles(&search_params(query)).await {
            Ok(rows) => Ok(into_list(rows, &query.pagination)),
            Err(err) => {
                log::warn!("{SEARCH_PROCEDURE} failed, listing from the profiles table: {err}");
                self.list_from_table(query).await
            }
        }
    }

    async fn list_from_table(&self, query: &ProfileListQuery) -> RepositoryResult<ListResult<Profile>> {
        let table_query = table_query(query);
        let (total, rows) = self.backend.list_profile_rows(&table_query).await?;
        let data = rows
            .into_iter()
            .take(table_query.pagination.limit())
            .map(Profile::from)
            .collect();
        Ok(ListResult::new(data, total))
    }

    /// Finds a profile by id.
    ///
    /// When the scan fails or never reaches the id, the bare table row is
    /// returned with the joined fields marked unavailable.
    pub async fn get(&self, id: ProfileId) -> RepositoryResult<Profile> {
        match self.scan_for(id).await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                if matches!(err, RepositoryError::NotFound(_)) {
                    log::debug!("{SEARCH_PROCEDURE} did not return profile {id}, reading the table");
                } else {
                    log::warn!("{SEARCH_PROCEDURE} failed, reading profile {id} from the table: {err}");
                }
                self.backend
                    .get_profile_row(id)
                    .await?
                    .map(Profile::from)
                    .ok_or_else(|| not_found(id))
            }
        }
    }

    /// Walks the default-sorted result set batch by batch from offset 0 until
    /// a batch contains `id` or comes back empty.
    pub async fn scan_for(&self, id: ProfileId) -> RepositoryResult<Profile> {
        let mut offset = 0;
        loop {
            let rows = self
                .backend
                .search_profiles(&scan_params(self.batch_size, offset))
                .await?;

            if rows.is_empty() {
                log::debug!("Profile {id} not found after scanning {offset} rows");
                return Err(not_found(id));
            }

            if let Some(row) = rows.into_iter().find(|row| row.id == id) {
                return Ok(row.into());
            }

            offset += self.batch_size;
        }
    }
}

fn not_found(id: ProfileId) -> RepositoryError {
    RepositoryError::NotFound(format!("profile {id}"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::profile::Computed;
    use crate::domain::types::{AccountStatus, SortOrder};
    use crate::models::profile::ProfileRow;
    use crate::repository::ProfileSortField;
    use crate::repository::mock::MockRepository;

    fn profile_id(n: u128) -> ProfileId {
        ProfileId::from_uuid(Uuid::from_u128(n))
    }

    fn search_row(n: u128, total_count: i64) -> SearchProfileRow {
        SearchProfileRow {
            id: profile_id(n),
            firstname: Some(format!("User {n}")),
            name: None,
            birthdate: None,
            bio: None,
            profession: None,
            declared_country: None,
            declared_city: None,
            declared_location: None,
            location_verified: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
            email: Some(format!("user{n}@example.com")),
            account_status: Some("active".into()),
            gender_value: Some("female".into()),
            profile_photo_url: None,
            total_count,
        }
    }

    fn table_row(n: u128) -> ProfileRow {
        ProfileRow {
            id: profile_id(n),
            firstname: Some("Ana".into()),
            name: Some(format!("Ana {n}")),
            birthdate: None,
            bio: None,
            profession: None,
            declared_country: None,
            declared_city: None,
            declared_location: None,
            location_verified: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    fn transport_error() -> RepositoryError {
        RepositoryError::ConnectionError("connection reset".into())
    }

    /// Backing set of `len` rows served in pages by the mocked procedure.
    fn serve_pages(repo: &mut MockRepository, len: u128, expected_calls: usize) {
        repo.expect_search_profiles()
            .times(expected_calls)
            .returning(move |params| {
                let rows = (1..=len)
                    .skip(params.page_offset)
                    .take(params.page_limit)
                    .map(|n| search_row(n, len as i64))
                    .collect();
                Ok(rows)
            });
    }

    #[tokio::test]
    async fn list_extracts_total_and_keeps_order() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .withf(|params| params.page_limit == 10 && params.page_offset == 0)
            .times(1)
            .returning(|_| Ok(vec![search_row(3, 42), search_row(1, 42), search_row(2, 42)]));
        repo.expect_list_profile_rows().times(0);

        let query = ProfileListQuery::new().paginate(1, 10);
        let result = ProfileSearch::new(&repo).list(&query).await.unwrap();

        assert_eq!(result.total, 42);
        let ids: Vec<_> = result.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![profile_id(3), profile_id(1), profile_id(2)]);
        for profile in &result.data {
            let json = serde_json::to_value(profile).unwrap();
            assert!(json.get("total_count").is_none());
            assert!(profile.email.is_available());
        }
    }

    #[tokio::test]
    async fn empty_page_has_zero_total() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let result = ProfileSearch::new(&repo)
            .list(&ProfileListQuery::new().paginate(7, 25))
            .await
            .unwrap();

        assert_eq!(result, ListResult::empty());
    }

    #[tokio::test]
    async fn page_never_exceeds_requested_size() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .returning(|_| Ok((1..=12).map(|n| search_row(n, 12)).collect()));

        let result = ProfileSearch::new(&repo)
            .list(&ProfileListQuery::new().paginate(1, 10))
            .await
            .unwrap();

        assert_eq!(result.data.len(), 10);
        assert_eq!(result.total, 12);
    }

    #[tokio::test]
    async fn filters_and_sort_are_forwarded_to_procedure() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .withf(|params| {
                params.search_firstname.as_deref() == Some("ana")
                    && params.search_name.is_none()
                    && params.search_email.as_deref() == Some("@example.com")
                    && params.filter_gender.as_deref() == Some("female")
                    && params.filter_status == Some(AccountStatus::Banned)
                    && params.sort_field == "email"
                    && params.sort_order == SortOrder::Asc
                    && params.page_limit == 25
                    && params.page_offset == 50
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let query = ProfileListQuery::new()
            .paginate(3, 25)
            .firstname("ana")
            .email("@example.com")
            .gender("female")
            .status(AccountStatus::Banned)
            .sort(ProfileSortField::Email, SortOrder::Asc);

        ProfileSearch::new(&repo).list(&query).await.unwrap();
    }

    #[tokio::test]
    async fn failed_procedure_falls_back_to_table_with_placeholders() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .times(1)
            .returning(|_| Err(transport_error()));
        repo.expect_list_profile_rows()
            .withf(|query| {
                query.firstname.as_deref() == Some("Ana")
                    && query.name.is_none()
                    && query.sort == ProfileSort::default()
                    && query.pagination == Pagination::new(1, 10)
            })
            .times(1)
            .returning(|_| Ok((2, vec![table_row(1), table_row(2)])));

        let query = ProfileListQuery::new()
            .paginate(1, 10)
            .firstname("Ana")
            .email("ana@")
            .status(AccountStatus::Paused)
            .sort(ProfileSortField::AccountStatus, SortOrder::Asc);
        let result = ProfileSearch::new(&repo).list(&query).await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.data.len(), 2);
        for profile in &result.data {
            assert_eq!(profile.email, Computed::Unavailable);
            assert_eq!(profile.account_status, Computed::Unavailable);
            assert_eq!(profile.profile_photo_url, Computed::Unavailable);
        }
    }

    #[tokio::test]
    async fn fallback_keeps_sort_on_base_column() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .returning(|_| Err(transport_error()));
        repo.expect_list_profile_rows()
            .withf(|query| {
                query.sort
                    == ProfileSort {
                        field: ProfileSortField::Birthdate,
                        order: SortOrder::Asc,
                    }
            })
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let query = ProfileListQuery::new().sort(ProfileSortField::Birthdate, SortOrder::Asc);
        ProfileSearch::new(&repo).list(&query).await.unwrap();
    }

    #[tokio::test]
    async fn only_fallback_error_surfaces() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .returning(|_| Err(transport_error()));
        repo.expect_list_profile_rows().times(1).returning(|_| {
            Err(RepositoryError::Backend {
                status: 400,
                code: Some("42703".into()),
                message: "column profiles.firstname does not exist".into(),
            })
        });

        let err = ProfileSearch::new(&repo)
            .list(&ProfileListQuery::new())
            .await
            .unwrap_err();

        match err {
            RepositoryError::Backend { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "column profiles.firstname does not exist");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_finds_profile_in_later_batch() {
        let mut repo = MockRepository::new();
        // 7 rows, batch of 2: row 6 sits in the third batch.
        serve_pages(&mut repo, 7, 3);

        let profile = ProfileSearch::new(&repo)
            .batch_size(2)
            .get(profile_id(6))
            .await
            .unwrap();

        assert_eq!(profile.id, profile_id(6));
        assert!(profile.account_status.is_available());
    }

    #[tokio::test]
    async fn get_stops_at_first_batch_containing_id() {
        let mut repo = MockRepository::new();
        // 5 rows, batch of 2: row 4 is found by the second call, so two calls
        // in total and no third.
        serve_pages(&mut repo, 5, 2);

        let profile = ProfileSearch::new(&repo)
            .batch_size(2)
            .get(profile_id(4))
            .await
            .unwrap();

        assert_eq!(profile.id, profile_id(4));
    }

    #[tokio::test]
    async fn get_scans_forward_with_default_sort() {
        let mut repo = MockRepository::new();
        let mut expected_offset = 0;
        repo.expect_search_profiles()
            .times(2)
            .returning(move |params| {
                assert_eq!(params.page_offset, expected_offset);
                assert_eq!(params.sort_field, "created_at");
                assert_eq!(params.sort_order, SortOrder::Desc);
                assert!(params.search_firstname.is_none() && params.filter_status.is_none());
                expected_offset += params.page_limit;
                Ok((1..=3)
                    .skip(params.page_offset)
                    .take(params.page_limit)
                    .map(|n| search_row(n, 3))
                    .collect())
            });

        ProfileSearch::new(&repo)
            .batch_size(2)
            .get(profile_id(3))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn scan_reports_missing_id_after_empty_batch() {
        let mut repo = MockRepository::new();
        // Batches at offsets 0, 2 and 4 hold rows; offset 6 is empty.
        serve_pages(&mut repo, 5, 4);

        let err = ProfileSearch::new(&repo)
            .batch_size(2)
            .scan_for(profile_id(99))
            .await
            .unwrap_err();

        match err {
            RepositoryError::NotFound(message) => {
                assert!(message.contains(&profile_id(99).to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_reads_table_when_procedure_omits_profile() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_get_profile_row()
            .withf(|id| *id == profile_id(8))
            .times(1)
            .returning(|_| Ok(Some(table_row(8))));

        let profile = ProfileSearch::new(&repo).get(profile_id(8)).await.unwrap();

        assert_eq!(profile.id, profile_id(8));
        assert_eq!(profile.email, Computed::Unavailable);
        assert_eq!(profile.account_status, Computed::Unavailable);
    }

    #[tokio::test]
    async fn get_missing_everywhere_is_not_found() {
        let mut repo = MockRepository::new();
        serve_pages(&mut repo, 3, 2);
        repo.expect_get_profile_row().times(1).returning(|_| Ok(None));

        let err = ProfileSearch::new(&repo)
            .batch_size(2)
            .get(profile_id(99))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_falls_back_to_table_row_when_procedure_fails() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .times(1)
            .returning(|_| Err(transport_error()));
        repo.expect_get_profile_row()
            .withf(|id| *id == profile_id(5))
            .times(1)
            .returning(|_| Ok(Some(table_row(5))));

        let profile = ProfileSearch::new(&repo).get(profile_id(5)).await.unwrap();

        assert_eq!(profile.id, profile_id(5));
        assert_eq!(profile.gender_value, Computed::Unavailable);
    }

    #[tokio::test]
    async fn get_fallback_without_row_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_search_profiles()
            .returning(|_| Err(transport_error()));
        repo.expect_get_profile_row().returning(|_| Ok(None));

        let err = ProfileSearch::new(&repo)
            .get(profile_id(5))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
