use serde::Serialize;

/// Transactional email template known to the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmailTemplateInfo {
    pub name: &'static str,
    pub subject: &'static str,
    pub description: &'static str,
}

/// Rendered email.
#[derive(Debug, Serialize, PartialEq)]
pub struct EmailPreview {
    pub subject: String,
    pub html: String,
}
