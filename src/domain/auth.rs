//! Two-step email login.
//!
//! A login starts with [`LoginState::AwaitingCode`] once the backend has
//! mailed a one-time code, and becomes [`LoginState::Authenticated`] when the
//! code is verified. Anything else is an invalid transition.

use serde::{Deserialize, Serialize};

use crate::domain::types::{AdminEmail, ProfileId};

/// Session issued by the backend authentication service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user_id: ProfileId,
    pub email: Option<String>,
}

/// Progress of a staff member through the login handshake.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoginState {
    AwaitingCode { email: AdminEmail },
    Authenticated { session: AuthSession },
}

impl LoginState {
    pub fn awaiting(email: AdminEmail) -> Self {
        LoginState::AwaitingCode { email }
    }

    /// Email the pending code was sent to, if a code is pending.
    pub fn pending_email(&self) -> Option<&AdminEmail> {
        match self {
            LoginState::AwaitingCode { email } => Some(email),
            LoginState::Authenticated { .. } => None,
        }
    }

    /// Completes the handshake. Only a pending login can be completed.
    pub fn complete(self, session: AuthSession) -> Result<Self, Self> {
        match self {
            LoginState::AwaitingCode { .. } => Ok(LoginState::Authenticated { session }),
            authenticated @ LoginState::Authenticated { .. } => Err(authenticated),
        }
    }
}
