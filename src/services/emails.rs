//! Transactional email previews rendered with Tera.

use chrono::{Datelike, Utc};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::dto::emails::{EmailPreview, EmailTemplateInfo};
use crate::models::auth::AuthenticatedUser;
use crate::repository::StaffReader;
use crate::services::{ServiceError, ServiceResult, ensure_staff};

const PROFILE_URL: &str = "https://yourapp.com/profile";

/// Templates that can be previewed, stored under `emails/{name}.html`.
pub const EMAIL_TEMPLATES: &[EmailTemplateInfo] = &[EmailTemplateInfo {
    name: "welcome",
    subject: "Welcome to MyHandyPlus! 👋",
    description: "Sent to members after they sign up",
}];

/// Sample recipient used when rendering a preview.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

fn find_template(name: &str) -> ServiceResult<&'static EmailTemplateInfo> {
    EMAIL_TEMPLATES
        .iter()
        .find(|template| template.name == name)
        .ok_or_else(|| ServiceError::NotFound(format!("email template {name}")))
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Renders `name` for the sample recipient.
pub fn render_email(tera: &Tera, name: &str, params: PreviewParams) -> ServiceResult<EmailPreview> {
    let template = find_template(name)?;

    let mut context = Context::new();
    context.insert("user_name", &non_blank(params.user_name, "there"));
    context.insert(
        "user_email",
        &non_blank(params.user_email, "user@example.com"),
    );
    context.insert("profile_url", PROFILE_URL);
    context.insert("year", &Utc::now().year());

    let html = tera
        .render(&format!("emails/{}.html", template.name), &context)
        .map_err(|err| {
            log::error!("Failed to render email template {name}: {err}");
            ServiceError::Internal(format!("failed to render {name}"))
        })?;

    Ok(EmailPreview {
        subject: template.subject.to_string(),
        html,
    })
}

pub async fn list_templates<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<&'static [EmailTemplateInfo]>
where
    R: StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;
    Ok(EMAIL_TEMPLATES)
}

pub async fn preview_email<R>(
    user: &AuthenticatedUser,
    name: &str,
    params: PreviewParams,
    tera: &Tera,
    repo: &R,
) -> ServiceResult<EmailPreview>
where
    R: StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;
    render_email(tera, name, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::StaffRole;
    use crate::services::test_support::{repo_with_role, staff_user};

    fn tera() -> Tera {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "emails/welcome.html",
            include_str!("../../templates/emails/welcome.html"),
        )
        .unwrap();
        tera
    }

    #[test]
    fn welcome_uses_defaults_for_missing_recipient() {
        let preview = render_email(&tera(), "welcome", PreviewParams::default()).unwrap();

        assert_eq!(preview.subject, "Welcome to MyHandyPlus! 👋");
        assert!(preview.html.contains("Welcome there! 👋"));
        assert!(preview.html.contains("user@example.com"));
        assert!(preview.html.contains("href=\"https://yourapp.com/profile\""));
    }

    #[test]
    fn recipient_name_is_escaped() {
        let params = PreviewParams {
            user_name: Some("<i>Ana</i>".into()),
            user_email: Some("ana@example.com".into()),
        };
        let preview = render_email(&tera(), "welcome", params).unwrap();

        assert!(preview.html.contains("Welcome &lt;i&gt;Ana&lt;"));
        assert!(preview.html.contains("ana@example.com"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let result = render_email(&tera(), "password_reset", PreviewParams::default());
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn listing_requires_staff() {
        let repo = repo_with_role(None);
        assert!(matches!(
            list_templates(&staff_user(), &repo).await,
            Err(ServiceError::Forbidden)
        ));

        let repo = repo_with_role(Some(StaffRole::Moderator));
        let templates = list_templates(&staff_user(), &repo).await.unwrap();
        assert_eq!(templates[0].name, "welcome");
    }
}
