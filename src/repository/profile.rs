use async_trait::async_trait;

use crate::domain::profile::Profile;
use crate::domain::types::ProfileId;
use crate::models::profile::{ProfileRow, SearchProfileRow, SearchProfilesParams};
use crate::pagination::ListResult;
use crate::repository::backend::{
    QueryParams, eq_param, ilike_param, limit_param, order_param, page_params, select_param,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::profile_search::{ProfileSearch, SEARCH_PROCEDURE};
use crate::repository::{
    ProfileListQuery, ProfileReader, ProfileSearchProcedure, ProfileTable, ProfileTableQuery,
    SupabaseRepository,
};

const PROFILES_TABLE: &str = "profiles";

/// Base columns of `profiles`; joined fields are not selectable here.
const PROFILE_COLUMNS: &str = "id,firstname,name,birthdate,bio,profession,declared_country,\
declared_city,declared_location,location_verified,created_at,updated_at";

/// PostgREST parameters for a plain table query.
fn table_params(query: &ProfileTableQuery) -> QueryParams {
    let mut params = vec![select_param(PROFILE_COLUMNS)];
    if let Some(firstname) = &query.firstname {
        params.push(ilike_param("firstname", firstname));
    }
    if let Some(name) = &query.name {
        params.push(ilike_param("name", name));
    }
    params.push(order_param(query.sort.field.column(), query.sort.order));
    params.extend(page_params(&query.pagination));
    params
}

#[async_trait]
impl ProfileSearchProcedure for SupabaseRepository {
    async fn search_profiles(
        &self,
        params: &SearchProfilesParams,
    ) -> RepositoryResult<Vec<SearchProfileRow>> {
        self.client()
            .rpc(SEARCH_PROCEDURE, params, self.token())
            .await
    }
}

#[async_trait]
impl ProfileTable for SupabaseRepository {
    async fn list_profile_rows(
        &self,
        query: &ProfileTableQuery,
    ) -> RepositoryResult<(usize, Vec<ProfileRow>)> {
        let (total, rows) = self
            .client()
            .select::<ProfileRow>(PROFILES_TABLE, &table_params(query), true, self.token())
            .await?;

        let total = total.unwrap_or_else(|| {
            log::warn!("profiles query returned no row count");
            query.pagination.offset().saturating_add(rows.len())
        });
        Ok((total, rows))
    }

    async fn get_profile_row(&self, id: ProfileId) -> RepositoryResult<Option<ProfileRow>> {
        let params = vec![
            select_param(PROFILE_COLUMNS),
            eq_param("id", id),
            limit_param(1),
        ];
        let (_, rows) = self
            .client()
            .select::<ProfileRow>(PROFILES_TABLE, &params, false, self.token())
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ProfileReader for SupabaseRepository {
    async fn list_profiles(&self, query: &ProfileListQuery) -> RepositoryResult<ListResult<Profile>> {
        ProfileSearch::new(self)
            .batch_size(self.search_batch_size)
            .list(query)
            .await
    }

    async fn get_profile(&self, id: ProfileId) -> RepositoryResult<Profile> {
        ProfileSearch::new(self)
            .batch_size(self.search_batch_size)
            .get(id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SortOrder;
    use crate::pagination::Pagination;
    use crate::repository::{ProfileSort, ProfileSortField};

    #[test]
    fn table_params_filter_by_name_fields_only() {
        let query = ProfileTableQuery {
            firstname: Some("Ana".into()),
            name: None,
            sort: ProfileSort {
                field: ProfileSortField::Firstname,
                order: SortOrder::Asc,
            },
            pagination: Pagination::new(2, 10),
        };

        let params = table_params(&query);

        assert_eq!(params[0].0, "select");
        assert!(params.contains(&("firstname".to_string(), "ilike.*Ana*".to_string())));
        assert!(params.contains(&("order".to_string(), "firstname.asc".to_string())));
        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(params.contains(&("offset".to_string(), "10".to_string())));
        assert!(!params.iter().any(|(key, _)| key == "name"));
    }
}
