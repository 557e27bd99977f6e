//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No account matches the email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// A registration field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] teeshack_cache::CacheError),
}

impl AuthError {
    /// Check if this is a failure the shopper caused (as opposed to storage).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::UserAlreadyExists(_) | AuthError::MissingField(_)
        )
    }
}
