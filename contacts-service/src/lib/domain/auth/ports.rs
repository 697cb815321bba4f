use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::NotificationError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::EmailVerification;
use crate::domain::auth::models::Notification;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;

/// Port for registration, login and token-driven account flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed account and queue its verification email.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, password and role
    /// * `origin` - Base URL used to build the verification link
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Conflict` - Email or username already registered (email is checked first)
    /// * `Internal` - Hashing or directory failure
    async fn register(&self, command: CreateUserCommand, origin: &str) -> Result<User, AuthError>;

    /// Exchange username and password for a session token.
    ///
    /// # Errors
    /// * `Unauthenticated` - Unknown user, wrong password or unconfirmed email
    /// * `Internal` - Hashing, token or directory failure
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;

    /// Confirm the email address named by a verification token.
    ///
    /// Idempotent: a second call reports `AlreadyVerified` without mutating.
    ///
    /// # Errors
    /// * `BadRequest` - Token invalid or expired, or no account has its email
    async fn verify_email(&self, token: &str) -> Result<EmailVerification, AuthError>;

    /// Queue a password reset email for a registered address.
    ///
    /// # Errors
    /// * `NotFound` - No account has this email
    async fn request_password_reset(&self, email: &str, origin: &str) -> Result<(), AuthError>;

    /// Set a new password using a reset token.
    ///
    /// # Errors
    /// * `BadRequest` - Token invalid or expired, or no account has its email
    async fn confirm_password_reset(&self, token: &str, new_password: &str)
        -> Result<(), AuthError>;

    /// Resolve the account behind a bearer session token.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid, expired, without subject or for an unknown user
    async fn current_user(&self, token: &str) -> Result<User, AuthError>;
}

/// Delivery channel for outgoing notifications.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one notification.
    ///
    /// # Errors
    /// * `InvalidMessage` - Message could not be built (e.g. bad recipient)
    /// * `DeliveryFailed` - Transport rejected or could not send the message
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}
