//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
///
/// Everything except [`AuthError::Storage`] is a recoverable, user-facing
/// outcome: the caller shows [`AuthError::user_message`] and the session is
/// left as it was.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected by the demo rules.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration input failed validation.
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    /// The authentication service refused the request.
    #[error("rejected by authentication service: {0}")]
    Rejected(String),

    /// The authentication service could not be reached or answered garbage.
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),

    /// Persisting the session failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message safe to show to the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::InvalidRegistration(_) => "Please fill in all fields correctly".to_string(),
            Self::Rejected(detail) => detail.clone(),
            Self::Unavailable(_) | Self::Storage(_) => {
                "An error occurred. Please try again.".to_string()
            }
        }
    }

    /// Whether this is an expected, visitor-caused failure (as opposed to
    /// an infrastructure problem worth reporting).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidRegistration(_) | Self::Rejected(_)
        )
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}
