//! Profile list, detail page and export.

use crate::domain::activity::UserPresence;
use crate::domain::photo::{
    GALLERY_SLOTS, GalleryPhoto, SignedPhoto, UserPhoto, gallery_storage_key,
    resolve_profile_photo,
};
use crate::domain::preference::Preference;
use crate::domain::profile::{Computed, Profile};
use crate::domain::resource::Resource;
use crate::domain::social::{ChatRoom, Match, Swipe};
use crate::domain::types::{ProfileId, SortOrder};
use crate::dto::profiles::{PhotoView, ProfileDetails};
use crate::forms::profiles::ProfileListParams;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListResult;
use crate::repository::{
    AccountReader, ProfileListQuery, ProfileReader, RecordQuery, RecordReader, StaffReader,
    StorageSigner,
};
use crate::services::resources::fetch_records;
use crate::services::{ServiceError, ServiceResult, ensure_staff};

/// Rows of each related resource shown on the detail page.
const DETAIL_ROWS: usize = 100;

fn parse_profile_id(raw: &str) -> ServiceResult<ProfileId> {
    raw.parse()
        .map_err(|_| ServiceError::NotFound(format!("profile {raw}")))
}

pub async fn list_profiles<R>(
    user: &AuthenticatedUser,
    params: ProfileListParams,
    repo: &R,
) -> ServiceResult<ListResult<Profile>>
where
    R: ProfileReader + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let query = ProfileListQuery::try_from(params)?;

    repo.list_profiles(&query).await.map_err(|err| {
        log::error!("Failed to list profiles: {err}");
        ServiceError::from(err)
    })
}

pub async fn get_profile<R>(user: &AuthenticatedUser, id: &str, repo: &R) -> ServiceResult<Profile>
where
    R: ProfileReader + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let id = parse_profile_id(id)?;

    repo.get_profile(id).await.map_err(|err| {
        log::error!("Failed to load profile {id}: {err}");
        ServiceError::from(err)
    })
}

/// Signs a storage key, reporting failures as a missing URL.
async fn sign_or_none<R>(repo: &R, storage_key: &str) -> Option<String>
where
    R: StorageSigner + ?Sized,
{
    match repo.sign_storage_key(storage_key).await {
        Ok(url) => Some(url),
        Err(err) => {
            log::warn!("Failed to sign {storage_key}: {err}");
            None
        }
    }
}

/// Signed links for the gallery slots that exist in storage.
async fn gallery_photos<R>(repo: &R, user_id: ProfileId) -> Vec<GalleryPhoto>
where
    R: StorageSigner + ?Sized,
{
    let mut gallery = Vec::new();
    for number in 0..GALLERY_SLOTS {
        let key = gallery_storage_key(user_id, number);
        match repo.sign_storage_key(&key).await {
            Ok(url) => gallery.push(GalleryPhoto { number, url }),
            Err(err) => log::debug!("Gallery slot {key} unavailable: {err}"),
        }
    }
    gallery
}

/// Rows of `resource` where either of two columns equals `user_id`.
async fn either_side<T, R>(
    repo: &R,
    resource: Resource,
    columns: [&str; 2],
    user_id: ProfileId,
) -> ServiceResult<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    R: RecordReader + ?Sized,
{
    let mut rows = Vec::new();
    for column in columns {
        let query = RecordQuery::new(resource)
            .eq(column, user_id)
            .paginate(1, DETAIL_ROWS);
        rows.extend(fetch_records::<T, _>(repo, &query).await?.data);
    }
    Ok(rows)
}

/// Collects the profile with everything moderators look at.
pub async fn profile_details<R>(
    user: &AuthenticatedUser,
    id: &str,
    repo: &R,
) -> ServiceResult<ProfileDetails>
where
    R: ProfileReader + RecordReader + AccountReader + StorageSigner + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let id = parse_profile_id(id)?;
    let profile = repo.get_profile(id).await.map_err(|err| {
        log::error!("Failed to load profile {id}: {err}");
        ServiceError::from(err)
    })?;

    let account_status = match profile.account_status.as_available() {
        Some(status) => *status,
        None => repo.get_account_status(id).await?,
    };
    let gender = match &profile.gender_value {
        Computed::Available(value) => value.clone(),
        Computed::Unavailable => repo.get_profile_gender(id).await?,
    };
    let gender_options = repo.list_gender_options().await?;

    let photo_query = RecordQuery::new(Resource::UserPhotos)
        .eq("user_id", id)
        .sort("sort_order", SortOrder::Asc)
        .paginate(1, DETAIL_ROWS);
    let user_photos = fetch_records::<UserPhoto, _>(repo, &photo_query).await?.data;

    let profile_photo = match resolve_profile_photo(&user_photos) {
        Some(photo) => Some(SignedPhoto {
            storage_key: photo.storage_key.clone(),
            url: sign_or_none(repo, &photo.storage_key).await,
        }),
        None => None,
    };

    let mut photos = Vec::with_capacity(user_photos.len());
    for photo in user_photos {
        let url = sign_or_none(repo, &photo.storage_key).await;
        photos.push(PhotoView { photo, url });
    }

    let gallery = gallery_photos(repo, id).await;

    let presence_query = RecordQuery::new(Resource::UserPresence)
        .eq("id", id)
        .paginate(1, 1);
    let presence = fetch_records::<UserPresence, _>(repo, &presence_query)
        .await?
        .data
        .into_iter()
        .next();

    let preference_query = RecordQuery::new(Resource::Preferences)
        .eq("user_id", id)
        .paginate(1, DETAIL_ROWS);
    let preferences = fetch_records::<Preference, _>(repo, &preference_query)
        .await?
        .data;

    let swipe_query = RecordQuery::new(Resource::Swipes)
        .eq("swiper_id", id)
        .paginate(1, DETAIL_ROWS);
    let swipes = fetch_records::<Swipe, _>(repo, &swipe_query).await?.data;

    let mut matches: Vec<Match> =
        either_side(repo, Resource::Matches, ["user1_id", "user2_id"], id).await?;
    matches.sort_by(|a, b| b.matched_at.cmp(&a.matched_at));

    let mut chat_rooms: Vec<ChatRoom> =
        either_side(repo, Resource::ChatRooms, ["user1_id", "user2_id"], id).await?;
    chat_rooms.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));

    Ok(ProfileDetails {
        profile,
        account_status,
        gender,
        gender_options,
        profile_photo,
        photos,
        gallery,
        presence,
        preferences,
        swipes,
        matches,
        chat_rooms,
    })
}

fn computed_cell<T: ToString>(value: &Computed<Option<T>>) -> String {
    match value {
        Computed::Available(Some(value)) => value.to_string(),
        _ => String::new(),
    }
}

/// Writes profiles as CSV, one row per profile.
pub fn profiles_to_csv(profiles: &[Profile]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "firstname",
        "name",
        "email",
        "account_status",
        "gender",
        "birthdate",
        "profession",
        "declared_country",
        "declared_city",
        "created_at",
    ])?;

    for profile in profiles {
        let status = profile
            .account_status
            .as_available()
            .map(ToString::to_string)
            .unwrap_or_default();
        writer.write_record([
            profile.id.to_string(),
            profile.firstname.clone().unwrap_or_default(),
            profile.name.clone().unwrap_or_default(),
            computed_cell(&profile.email),
            status,
            computed_cell(&profile.gender_value),
            profile
                .birthdate
                .map(|date| date.to_string())
                .unwrap_or_default(),
            profile.profession.clone().unwrap_or_default(),
            profile.declared_country.clone().unwrap_or_default(),
            profile.declared_city.clone().unwrap_or_default(),
            profile.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Exports the filtered profile list as CSV.
pub async fn export_profiles<R>(
    user: &AuthenticatedUser,
    params: ProfileListParams,
    repo: &R,
) -> ServiceResult<String>
where
    R: ProfileReader + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let query = params.into_export_query()?;
    let page = repo.list_profiles(&query).await.map_err(|err| {
        log::error!("Failed to list profiles for export: {err}");
        ServiceError::from(err)
    })?;

    if page.total > page.data.len() {
        log::warn!(
            "Profile export truncated to {} of {} rows",
            page.data.len(),
            page.total
        );
    }

    profiles_to_csv(&page.data).map_err(|err| {
        log::error!("Failed to write profile export: {err}");
        ServiceError::Internal(err.to_string())
    })
}
