//! DTOs shaped for the profile detail page.

use serde::Serialize;

use crate::domain::activity::UserPresence;
use crate::domain::photo::{GalleryPhoto, SignedPhoto, UserPhoto};
use crate::domain::preference::Preference;
use crate::domain::profile::{GenderOption, Profile};
use crate::domain::social::{ChatRoom, Match, Swipe};
use crate::domain::types::AccountStatus;

/// Uploaded photo with a link for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhotoView {
    #[serde(flatten)]
    pub photo: UserPhoto,
    /// `None` when the key could not be signed.
    pub url: Option<String>,
}

/// Everything the dashboard shows about one member.
#[derive(Debug, Serialize)]
pub struct ProfileDetails {
    pub profile: Profile,
    pub account_status: AccountStatus,
    pub gender: Option<String>,
    pub gender_options: Vec<GenderOption>,
    pub profile_photo: Option<SignedPhoto>,
    pub photos: Vec<PhotoView>,
    pub gallery: Vec<GalleryPhoto>,
    pub presence: Option<UserPresence>,
    pub preferences: Vec<Preference>,
    pub swipes: Vec<Swipe>,
    pub matches: Vec<Match>,
    pub chat_rooms: Vec<ChatRoom>,
}
