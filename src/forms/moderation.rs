//! Forms for the moderation actions on a profile.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{AccountStatus, DeletionReason, ModerationNote};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

impl TryFrom<StatusForm> for AccountStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        form.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenderForm {
    /// Value of one of the active gender attributes, e.g. `female`.
    #[validate(length(min = 1))]
    pub gender: String,
}

#[derive(Debug, Deserialize)]
/// Confirmation of a permanent account deletion.
pub struct DeleteProfileForm {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Validated deletion request.
#[derive(Debug, PartialEq)]
pub struct DeleteProfilePayload {
    pub reason: DeletionReason,
    pub details: Option<ModerationNote>,
}

impl TryFrom<DeleteProfileForm> for DeleteProfilePayload {
    type Error = FormError;

    fn try_from(form: DeleteProfileForm) -> Result<Self, Self::Error> {
        let reason = form.reason.trim();
        if reason.is_empty() {
            return Err(FormError::MissingReason);
        }
        let reason = reason.parse().map_err(|_| FormError::InvalidReason)?;

        // Notes that are empty once sanitized are dropped.
        let details = form.details.and_then(|details| ModerationNote::new(details).ok());

        Ok(Self { reason, details })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_form_parses_wire_value() {
        let form = StatusForm {
            status: "under_review".into(),
        };
        assert_eq!(
            AccountStatus::try_from(form).unwrap(),
            AccountStatus::UnderReview
        );
        let bad = StatusForm {
            status: "deleted".into(),
        };
        assert!(matches!(
            AccountStatus::try_from(bad),
            Err(FormError::InvalidStatus)
        ));
    }

    #[test]
    fn delete_form_requires_reason() {
        let form = DeleteProfileForm {
            reason: "  ".into(),
            details: None,
        };
        assert!(matches!(
            DeleteProfilePayload::try_from(form),
            Err(FormError::MissingReason)
        ));

        let form = DeleteProfileForm {
            reason: "bored".into(),
            details: None,
        };
        assert!(matches!(
            DeleteProfilePayload::try_from(form),
            Err(FormError::InvalidReason)
        ));
    }

    #[test]
    fn delete_form_sanitizes_details() {
        let form = DeleteProfileForm {
            reason: "harassment".into(),
            details: Some("<script>alert(1)</script>Reported 3 times".into()),
        };
        let payload = DeleteProfilePayload::try_from(form).unwrap();
        assert_eq!(payload.reason, DeletionReason::Harassment);
        assert_eq!(
            payload.details.as_ref().map(ModerationNote::as_str),
            Some("Reported 3 times")
        );

        let form = DeleteProfileForm {
            reason: "spam".into(),
            details: Some("   ".into()),
        };
        assert_eq!(DeleteProfilePayload::try_from(form).unwrap().details, None);
    }
}
