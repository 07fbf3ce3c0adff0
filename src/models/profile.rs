//! Profile rows as returned by the backend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::profile::{Computed, Profile};
use crate::domain::types::{AccountStatus, ProfileId, SortOrder};

/// Arguments of the `search_profiles` procedure.
///
/// Filters that were not supplied are sent as JSON `null`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SearchProfilesParams {
    pub search_firstname: Option<String>,
    pub search_name: Option<String>,
    pub search_email: Option<String>,
    pub filter_gender: Option<String>,
    pub filter_status: Option<AccountStatus>,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub page_limit: usize,
    pub page_offset: usize,
}

/// Row produced by `search_profiles`.
///
/// Every row of a page repeats the size of the whole result set in
/// `total_count`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SearchProfileRow {
    pub id: ProfileId,
    pub firstname: Option<String>,
    pub name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub declared_country: Option<String>,
    pub declared_city: Option<String>,
    pub declared_location: Option<serde_json::Value>,
    pub location_verified: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: Option<String>,
    pub account_status: Option<String>,
    pub gender_value: Option<String>,
    pub profile_photo_url: Option<String>,
    pub total_count: i64,
}

impl SearchProfileRow {
    /// Size of the full result set this row belongs to.
    pub fn total(&self) -> usize {
        usize::try_from(self.total_count).unwrap_or(0)
    }
}

/// Row of the `profiles` table read without any joins.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProfileRow {
    pub id: ProfileId,
    pub firstname: Option<String>,
    pub name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub declared_country: Option<String>,
    pub declared_city: Option<String>,
    pub declared_location: Option<serde_json::Value>,
    pub location_verified: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reads a stored account status, treating missing or unknown values as active.
pub fn parse_account_status(user_id: ProfileId, value: Option<&str>) -> AccountStatus {
    match value {
        None => AccountStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Unknown account status {raw:?} for profile {user_id}, using active");
            AccountStatus::default()
        }),
    }
}

impl From<SearchProfileRow> for Profile {
    fn from(row: SearchProfileRow) -> Self {
        let account_status = parse_account_status(row.id, row.account_status.as_deref());
        Self {
            id: row.id,
            firstname: row.firstname,
            name: row.name,
            birthdate: row.birthdate,
            bio: row.bio,
            profession: row.profession,
            declared_country: row.declared_country,
            declared_city: row.declared_city,
            declared_location: row.declared_location,
            location_verified: row.location_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
            email: Computed::Available(row.email),
            account_status: Computed::Available(account_status),
            gender_value: Computed::Available(row.gender_value),
            profile_photo_url: Computed::Available(row.profile_photo_url),
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            firstname: row.firstname,
            name: row.name,
            birthdate: row.birthdate,
            bio: row.bio,
            profession: row.profession,
            declared_country: row.declared_country,
            declared_city: row.declared_city,
            declared_location: row.declared_location,
            location_verified: row.location_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
            email: Computed::Unavailable,
            account_status: Computed::Unavailable,
            gender_value: Computed::Unavailable,
            profile_photo_url: Computed::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn search_row_json() -> serde_json::Value {
        json!({
            "id": "7b3c1d2e-9f1a-4c55-8e21-2a4b5c6d7e8f",
            "firstname": "Ana",
            "name": "Ana Lopez",
            "birthdate": "1994-05-02",
            "bio": null,
            "profession": "Nurse",
            "declared_country": "ES",
            "declared_city": "Madrid",
            "declared_location": null,
            "location_verified": true,
            "created_at": "2025-02-01T10:00:00Z",
            "updated_at": "2025-02-03T10:00:00+00:00",
            "email": "ana@example.com",
            "account_status": "under_review",
            "gender_value": "female",
            "profile_photo_url": null,
            "total_count": 42
        })
    }

    #[test]
    fn search_row_converts_with_computed_fields() {
        let row: SearchProfileRow = serde_json::from_value(search_row_json()).unwrap();
        assert_eq!(row.total(), 42);

        let profile = Profile::from(row);
        assert_eq!(
            profile.email,
            Computed::Available(Some("ana@example.com".to_string()))
        );
        assert_eq!(
            profile.account_status,
            Computed::Available(AccountStatus::UnderReview)
        );
        assert_eq!(profile.profile_photo_url, Computed::Available(None));

        let serialized = serde_json::to_value(&profile).unwrap();
        assert!(serialized.get("total_count").is_none());
    }

    #[test]
    fn table_row_marks_computed_fields_unavailable() {
        let mut value = search_row_json();
        let object = value.as_object_mut().unwrap();
        for key in [
            "email",
            "account_status",
            "gender_value",
            "profile_photo_url",
            "total_count",
        ] {
            object.remove(key);
        }

        let row: ProfileRow = serde_json::from_value(value).unwrap();
        let profile = Profile::from(row);

        assert_eq!(profile.firstname.as_deref(), Some("Ana"));
        assert_eq!(profile.email, Computed::Unavailable);
        assert_eq!(profile.account_status, Computed::Unavailable);
        assert_eq!(profile.gender_value, Computed::Unavailable);
        assert_eq!(profile.profile_photo_url, Computed::Unavailable);
    }

    #[test]
    fn unknown_status_reads_as_active() {
        let id: ProfileId = "7b3c1d2e-9f1a-4c55-8e21-2a4b5c6d7e8f".parse().unwrap();
        assert_eq!(parse_account_status(id, None), AccountStatus::Active);
        assert_eq!(parse_account_status(id, Some("frozen")), AccountStatus::Active);
        assert_eq!(
            parse_account_status(id, Some("banned")),
            AccountStatus::Banned
        );
    }

    #[test]
    fn absent_filters_serialize_as_null() {
        let params = SearchProfilesParams {
            search_firstname: Some("ana".into()),
            search_name: None,
            search_email: None,
            filter_gender: None,
            filter_status: Some(AccountStatus::Banned),
            sort_field: "created_at".into(),
            sort_order: SortOrder::Desc,
            page_limit: 10,
            page_offset: 20,
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "search_firstname": "ana",
                "search_name": null,
                "search_email": null,
                "filter_gender": null,
                "filter_status": "banned",
                "sort_field": "created_at",
                "sort_order": "DESC",
                "page_limit": 10,
                "page_offset": 20
            })
        );
    }
}
