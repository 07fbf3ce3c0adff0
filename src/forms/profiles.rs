use serde::Deserialize;

use crate::domain::types::{AccountStatus, SortOrder};
use crate::forms::FormError;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE};
use crate::repository::{ProfileListQuery, ProfileSortField};

/// Query string of the profile list and export.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub firstname: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

impl ProfileListParams {
    fn into_query(self, page: usize, per_page: usize) -> Result<ProfileListQuery, FormError> {
        let mut query = ProfileListQuery::new().paginate(page, per_page);

        if let Some(sort) = self.sort.as_deref() {
            match sort.parse::<ProfileSortField>() {
                Ok(field) => {
                    let order = self
                        .order
                        .as_deref()
                        .and_then(SortOrder::parse_lenient)
                        .unwrap_or(SortOrder::Desc);
                    query = query.sort(field, order);
                }
                Err(_) => log::debug!("Ignoring unknown profile sort field {sort:?}"),
            }
        }

        if let Some(value) = self.firstname {
            query = query.firstname(value);
        }
        if let Some(value) = self.name {
            query = query.name(value);
        }
        if let Some(value) = self.email {
            query = query.email(value);
        }
        if let Some(value) = self.gender {
            query = query.gender(value);
        }
        if let Some(status) = self.status.filter(|status| !status.trim().is_empty()) {
            let status: AccountStatus = status.parse().map_err(|_| FormError::InvalidStatus)?;
            query = query.status(status);
        }

        Ok(query)
    }

    /// Query for the export: the first page of the largest allowed size.
    pub fn into_export_query(self) -> Result<ProfileListQuery, FormError> {
        self.into_query(1, MAX_ITEMS_PER_PAGE)
    }
}

impl TryFrom<ProfileListParams> for ProfileListQuery {
    type Error = FormError;

    fn try_from(params: ProfileListParams) -> Result<Self, Self::Error> {
        let page = params.page.unwrap_or(1);
        let per_page = params.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);
        params.into_query(page, per_page)
    }
}
