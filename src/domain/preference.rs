use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, RowId};

/// Row of `preferences`. Referenced ids point at `types_preferences`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Preference {
    pub id: RowId,
    pub user_id: ProfileId,
    pub preferred_gender_id: Option<i64>,
    pub relationship_type_id: Option<i64>,
    pub age_ranges: Option<serde_json::Value>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub distance_max_km: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}
