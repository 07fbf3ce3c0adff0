use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountStatus, ProfileId};

/// Value of a field that is computed by a join on the backend.
///
/// The generic table path cannot perform those joins, so such fields are
/// reported as [`Computed::Unavailable`] instead of being left out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Computed<T> {
    Available(T),
    Unavailable,
}

impl<T> Computed<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Computed::Available(_))
    }

    /// Returns the computed value when it was resolved.
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Computed::Available(value) => Some(value),
            Computed::Unavailable => None,
        }
    }
}

/// Dating profile as shown in the dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub firstname: Option<String>,
    pub name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub declared_country: Option<String>,
    pub declared_city: Option<String>,
    /// Geo point as stored by the backend.
    pub declared_location: Option<serde_json::Value>,
    pub location_verified: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Email of the linked auth user.
    pub email: Computed<Option<String>>,
    pub account_status: Computed<AccountStatus>,
    pub gender_value: Computed<Option<String>>,
    /// Signed URL of the profile picture.
    pub profile_photo_url: Computed<Option<String>>,
}

/// Gender option from `types_attributes`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderOption {
    pub id: i64,
    pub value: String,
}

/// Attribute ids reserved for the gender category in `profile_attributes`.
pub const GENDER_ATTRIBUTE_IDS: [i64; 3] = [0, 1, 2];
