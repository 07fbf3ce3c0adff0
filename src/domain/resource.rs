//! Tables browsed through the generic list endpoint.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::{SortOrder, TypeConstraintError};

/// Dashboard resource backed by a single table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    UserPhotos,
    ChatRooms,
    Matches,
    FcmTokens,
    Messages,
    Preferences,
    Problems,
    StaffRoles,
    Swipes,
    UserLocations,
    UserPresence,
    UserBlocks,
    UsersDeleted,
}

impl Resource {
    pub const ALL: [Resource; 13] = [
        Resource::UserPhotos,
        Resource::ChatRooms,
        Resource::Matches,
        Resource::FcmTokens,
        Resource::Messages,
        Resource::Preferences,
        Resource::Problems,
        Resource::StaffRoles,
        Resource::Swipes,
        Resource::UserLocations,
        Resource::UserPresence,
        Resource::UserBlocks,
        Resource::UsersDeleted,
    ];

    pub const fn table(self) -> &'static str {
        match self {
            Resource::UserPhotos => "user_photos",
            Resource::ChatRooms => "chat_rooms",
            Resource::Matches => "matches",
            Resource::FcmTokens => "fcm_tokens",
            Resource::Messages => "messages",
            Resource::Preferences => "preferences",
            Resource::Problems => "problems",
            Resource::StaffRoles => "staff_roles",
            Resource::Swipes => "swipes",
            Resource::UserLocations => "user_locations",
            Resource::UserPresence => "user_presence",
            Resource::UserBlocks => "user_blocks",
            Resource::UsersDeleted => "users_deleted",
        }
    }

    /// Ordering used when the caller does not ask for one.
    pub const fn default_sort(self) -> (&'static str, SortOrder) {
        match self {
            Resource::Matches => ("matched_at", SortOrder::Desc),
            Resource::ChatRooms => ("last_message_at", SortOrder::Desc),
            Resource::Messages => ("sent_at", SortOrder::Desc),
            Resource::StaffRoles => ("assigned_at", SortOrder::Desc),
            Resource::UserPresence => ("last_seen", SortOrder::Desc),
            Resource::UserBlocks => ("updated_at", SortOrder::Desc),
            Resource::UsersDeleted => ("deleted_at", SortOrder::Desc),
            _ => ("created_at", SortOrder::Desc),
        }
    }

    /// Physical columns that may be used for sorting and equality filters.
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Resource::UserPhotos => &[
                "id", "user_id", "kind", "status", "sort_order", "is_primary", "created_at",
            ],
            Resource::ChatRooms => &["id", "user1_id", "user2_id", "created_at", "last_message_at"],
            Resource::Matches => &["id", "user1_id", "user2_id", "matched_at"],
            Resource::FcmTokens => &["id", "user_id", "created_at"],
            Resource::Messages => &[
                "id", "room_id", "sender_id", "receiver_id", "sent_at", "read_at",
            ],
            Resource::Preferences => &[
                "id", "user_id", "preferred_gender_id", "relationship_type_id", "created_at",
            ],
            Resource::Problems => &[
                "id", "user_id", "status", "priority", "email_sent", "created_at", "resolved_at",
            ],
            Resource::StaffRoles => &["user_id", "role", "assigned_at"],
            Resource::Swipes => &["swiper_id", "swipee_id", "is_like", "created_at"],
            Resource::UserLocations => &["id", "user_id", "country_code", "city", "created_at"],
            Resource::UserPresence => &["id", "is_online", "app_state", "last_seen"],
            Resource::UserBlocks => &["id", "blocker_id", "blocked_user_id", "updated_at"],
            Resource::UsersDeleted => &[
                "id", "user_id", "email", "deletion_reason", "deleted_at",
            ],
        }
    }

    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Resource {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.table() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_parse_from_table_names() {
        for resource in Resource::ALL {
            assert_eq!(resource.table().parse::<Resource>().unwrap(), resource);
        }
        assert!("profiles".parse::<Resource>().is_err());
    }

    #[test]
    fn default_sort_column_is_filterable() {
        for resource in Resource::ALL {
            let (column, _) = resource.default_sort();
            assert!(resource.has_column(column), "{resource} lacks {column}");
        }
    }
}
