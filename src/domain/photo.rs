use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, RowId};

/// Number of fixed gallery slots stored per user.
pub const GALLERY_SLOTS: u8 = 5;

/// Row of `user_photos`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserPhoto {
    pub id: RowId,
    pub user_id: ProfileId,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub storage_key: String,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Photo together with a time-limited link to the stored object.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SignedPhoto {
    pub storage_key: String,
    /// `None` when the storage service refused to sign the key.
    pub url: Option<String>,
}

/// Gallery slot that exists in storage.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GalleryPhoto {
    pub number: u8,
    pub url: String,
}

/// Storage key of a gallery slot.
pub fn gallery_storage_key(user_id: ProfileId, number: u8) -> String {
    format!("users/{user_id}/gallery/{number}.webp")
}

/// Picks the photo that represents the profile.
///
/// The photo in slot 0 wins, then the one flagged primary, then the most
/// recently uploaded one.
pub fn resolve_profile_photo(photos: &[UserPhoto]) -> Option<&UserPhoto> {
    photos
        .iter()
        .find(|photo| photo.sort_order == Some(0))
        .or_else(|| photos.iter().find(|photo| photo.is_primary))
        .or_else(|| photos.iter().max_by_key(|photo| photo.created_at))
}
