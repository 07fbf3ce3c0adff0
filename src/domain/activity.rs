//! Records describing where and how members use the app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, RowId};

/// Row of `user_presence`; keyed by the profile id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserPresence {
    pub id: ProfileId,
    #[serde(default)]
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub app_state: Option<String>,
    pub platform: Option<String>,
    pub allow_presence_sharing: Option<bool>,
    pub show_to_matches_only: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row of `user_locations`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserLocation {
    pub id: RowId,
    pub user_id: ProfileId,
    pub ip_address: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of `fcm_tokens`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FcmToken {
    pub id: RowId,
    pub user_id: ProfileId,
    pub token: String,
    /// Free-form device description, e.g. `{"platform": "ios"}`.
    pub device_info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
