//! Records written and read by moderators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountStatus, DeletionReason, ProfileId, RowId};

/// Row of `problems` reported by members.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    pub id: RowId,
    pub user_id: Option<ProfileId>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Row of `users_deleted`, the audit trail of removed accounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeletedUser {
    pub id: RowId,
    pub user_id: ProfileId,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub deletion_reason: String,
    pub deletion_details: Option<String>,
    pub deleted_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Upsert payload for `user_account_status`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AccountStatusChange {
    pub user_id: ProfileId,
    pub status: AccountStatus,
    pub reason: String,
    pub changed_by: ProfileId,
    pub changed_at: DateTime<Utc>,
}

impl AccountStatusChange {
    /// Status change performed by a staff member right now.
    pub fn by_staff(user_id: ProfileId, status: AccountStatus, changed_by: ProfileId) -> Self {
        Self {
            user_id,
            status,
            reason: format!("Status changed to {status} by admin"),
            changed_by,
            changed_at: Utc::now(),
        }
    }
}

/// Insert payload for `users_deleted`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewDeletedUser {
    pub user_id: ProfileId,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub deletion_reason: DeletionReason,
    pub deletion_details: Option<String>,
    pub deleted_at: DateTime<Utc>,
}
