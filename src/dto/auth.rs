use serde::Serialize;

use crate::domain::types::StaffRole;

/// Reply to either login step.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum LoginStep {
    /// A code was mailed to `email`.
    CodeSent { email: String },
    SignedIn { email: Option<String>, role: StaffRole },
}

/// Reply of `GET /auth/permissions`.
#[derive(Debug, Serialize, PartialEq)]
pub struct Permissions {
    pub role: Option<StaffRole>,
}
