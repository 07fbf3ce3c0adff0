use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Backend error ({status}): {message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// HTTP status reported by the backend, if the request reached it.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_)) || self.status() == Some(404)
    }

    /// The backend refused the caller's credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::ValidationError(format!("Unexpected response body: {err}"))
        } else if err.is_builder() {
            RepositoryError::Unexpected(format!("Invalid request: {err}"))
        } else if let Some(status) = err.status() {
            RepositoryError::Backend {
                status: status.as_u16(),
                code: None,
                message: err.to_string(),
            }
        } else {
            RepositoryError::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::ValidationError(format!("Serialization error: {err}"))
    }
}
