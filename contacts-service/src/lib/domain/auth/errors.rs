use thiserror::Error;

use crate::user::errors::UserError;

pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
pub const INCORRECT_LOGIN: &str = "Incorrect login or password.";
pub const EMAIL_NOT_CONFIRMED: &str = "Email address not confirmed.";
pub const PERMISSION_DENIED: &str = "Permission Denied";
pub const INVALID_OR_EXPIRED_TOKEN: &str = "Invalid or expired token";
pub const VERIFICATION_ERROR: &str = "Verification error";
pub const DUPLICATE_EMAIL: &str = "A user already exists with the same email.";
pub const DUPLICATE_USERNAME: &str = "A user already exists with the same username.";
pub const USER_NOT_FOUND: &str = "User not found";

/// Outcome of an authentication or authorization flow that did not succeed.
///
/// Each variant carries the exact message shown to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::Unauthenticated(INVALID_CREDENTIALS.to_string())
    }

    pub fn invalid_or_expired_token() -> Self {
        AuthError::BadRequest(INVALID_OR_EXPIRED_TOKEN.to_string())
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => AuthError::Conflict(DUPLICATE_EMAIL.to_string()),
            UserError::UsernameAlreadyExists(_) => {
                AuthError::Conflict(DUPLICATE_USERNAME.to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidRole(_)
            | UserError::InvalidAvatar(_) => AuthError::BadRequest(err.to_string()),
            UserError::NotFound(_) => AuthError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::StorageError(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

/// Error for notification delivery failures
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to build message: {0}")]
    InvalidMessage(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}
