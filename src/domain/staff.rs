use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ProfileId;

/// Row of `staff_roles`.
///
/// The role is kept as stored; only `admin` and `moderator` grant access.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffRoleAssignment {
    pub user_id: ProfileId,
    pub role: String,
    pub assigned_at: Option<DateTime<Utc>>,
}
