//! Typed rows of the generic resource list.

use serde::Serialize;

use crate::domain::activity::{FcmToken, UserLocation, UserPresence};
use crate::domain::moderation::{DeletedUser, Problem};
use crate::domain::photo::UserPhoto;
use crate::domain::preference::Preference;
use crate::domain::resource::Resource;
use crate::domain::social::{ChatRoom, Match, Message, Swipe, UserBlock};
use crate::domain::staff::StaffRoleAssignment;

/// One row of any browsable resource.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResourceRecord {
    UserPhoto(UserPhoto),
    ChatRoom(ChatRoom),
    Match(Match),
    FcmToken(FcmToken),
    Message(Message),
    Preference(Preference),
    Problem(Problem),
    StaffRole(StaffRoleAssignment),
    Swipe(Swipe),
    UserLocation(UserLocation),
    UserPresence(UserPresence),
    UserBlock(UserBlock),
    DeletedUser(DeletedUser),
}

impl ResourceRecord {
    /// Decodes a raw row as the record type of `resource`.
    pub fn decode(resource: Resource, row: serde_json::Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        Ok(match resource {
            Resource::UserPhotos => ResourceRecord::UserPhoto(from_value(row)?),
            Resource::ChatRooms => ResourceRecord::ChatRoom(from_value(row)?),
            Resource::Matches => ResourceRecord::Match(from_value(row)?),
            Resource::FcmTokens => ResourceRecord::FcmToken(from_value(row)?),
            Resource::Messages => ResourceRecord::Message(from_value(row)?),
            Resource::Preferences => ResourceRecord::Preference(from_value(row)?),
            Resource::Problems => ResourceRecord::Problem(from_value(row)?),
            Resource::StaffRoles => ResourceRecord::StaffRole(from_value(row)?),
            Resource::Swipes => ResourceRecord::Swipe(from_value(row)?),
            Resource::UserLocations => ResourceRecord::UserLocation(from_value(row)?),
            Resource::UserPresence => ResourceRecord::UserPresence(from_value(row)?),
            Resource::UserBlocks => ResourceRecord::UserBlock(from_value(row)?),
            Resource::UsersDeleted => ResourceRecord::DeletedUser(from_value(row)?),
        })
    }
}
