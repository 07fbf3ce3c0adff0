//! Records describing interactions between members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, RowId};

/// Row of `matches`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: RowId,
    pub user1_id: ProfileId,
    pub user2_id: ProfileId,
    pub matched_at: DateTime<Utc>,
    pub seen_by_user1: Option<bool>,
    pub seen_by_user2: Option<bool>,
}

/// Row of `chat_rooms`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatRoom {
    pub id: RowId,
    pub user1_id: ProfileId,
    pub user2_id: ProfileId,
    pub created_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// Row of `messages`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: RowId,
    pub room_id: RowId,
    pub sender_id: ProfileId,
    pub receiver_id: Option<ProfileId>,
    pub content: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Row of `swipes`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Swipe {
    #[serde(default)]
    pub id: Option<RowId>,
    pub swiper_id: ProfileId,
    pub swipee_id: ProfileId,
    pub is_like: bool,
    pub seen_by_swipee: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row of `user_blocks`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserBlock {
    pub id: RowId,
    pub blocker_id: ProfileId,
    pub blocked_user_id: ProfileId,
    pub reason: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
