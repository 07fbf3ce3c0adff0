//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod moderation;
pub mod profiles;
pub mod resources;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid one-time code")]
    InvalidCode,

    #[error("invalid account status")]
    InvalidStatus,

    #[error("invalid gender")]
    InvalidGender,

    #[error("a deletion reason is required")]
    MissingReason,

    #[error("invalid deletion reason")]
    InvalidReason,

    #[error("invalid page parameter")]
    InvalidPage,
}
