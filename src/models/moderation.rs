//! Rows and payloads behind the moderation actions.

use serde::{Deserialize, Serialize};

use crate::domain::types::ProfileId;

/// Row of `user_account_status` when only the status is selected.
#[derive(Debug, Deserialize)]
pub struct AccountStatusRow {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttributeValue {
    pub value: String,
}

/// Row of `profile_attributes` embedding the referenced attribute.
#[derive(Debug, Deserialize)]
pub struct ProfileAttributeRow {
    pub attribute_id: i64,
    pub types_attributes: Option<AttributeValue>,
}

/// Insert payload for `profile_attributes`.
#[derive(Debug, Serialize)]
pub struct NewProfileAttribute {
    pub user_id: ProfileId,
    pub attribute_id: i64,
}

/// Body of the `delete-user` edge function.
#[derive(Debug, Serialize)]
pub struct DeleteUserRequest {
    #[serde(rename = "userId")]
    pub user_id: ProfileId,
}
