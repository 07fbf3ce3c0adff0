//! Envelopes shared by the backend services.

use serde::{Deserialize, Serialize};

/// Error body returned by any of the backend services.
///
/// PostgREST uses `message`, the auth service `msg` or `error_description`,
/// and storage `error`; whichever is present describes the failure.
#[derive(Debug, Default, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl BackendErrorBody {
    pub fn describe(&self) -> Option<String> {
        let message = self
            .message
            .as_ref()
            .or(self.msg.as_ref())
            .or(self.error_description.as_ref())
            .or(self.error.as_ref())?;

        Some(match &self.hint {
            Some(hint) => format!("{message} ({hint})"),
            None => message.clone(),
        })
    }

    /// Machine-readable code, e.g. `PGRST202` for a missing procedure.
    pub fn code(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(code) => Some(code.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Body of `POST /storage/v1/object/sign/{bucket}/{key}`.
#[derive(Debug, Serialize)]
pub struct SignObjectRequest {
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

/// Path of the signed object, relative to `/storage/v1`.
#[derive(Debug, Deserialize)]
pub struct SignedObject {
    #[serde(rename = "signedURL")]
    pub signed_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_postgrest_error() {
        let body: BackendErrorBody = serde_json::from_str(
            r#"{"code":"PGRST202","details":null,"hint":"Perhaps you meant search_users","message":"Could not find the function"}"#,
        )
        .unwrap();

        assert_eq!(body.code().as_deref(), Some("PGRST202"));
        assert_eq!(
            body.describe().as_deref(),
            Some("Could not find the function (Perhaps you meant search_users)")
        );
    }

    #[test]
    fn describes_auth_error() {
        let body: BackendErrorBody =
            serde_json::from_str(r#"{"code":403,"error_code":"otp_expired","msg":"Token has expired or is invalid"}"#)
                .unwrap();

        assert_eq!(body.code().as_deref(), Some("403"));
        assert_eq!(
            body.describe().as_deref(),
            Some("Token has expired or is invalid")
        );
    }
}
