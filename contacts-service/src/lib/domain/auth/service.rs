use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;

use crate::domain::auth::cache::CurrentUserCache;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::DUPLICATE_EMAIL;
use crate::domain::auth::errors::DUPLICATE_USERNAME;
use crate::domain::auth::errors::EMAIL_NOT_CONFIRMED;
use crate::domain::auth::errors::INCORRECT_LOGIN;
use crate::domain::auth::errors::PERMISSION_DENIED;
use crate::domain::auth::errors::USER_NOT_FOUND;
use crate::domain::auth::errors::VERIFICATION_ERROR;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::EmailVerification;
use crate::domain::auth::models::Notification;
use crate::domain::auth::notifications::NotificationQueue;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Admin gate applied after the current user has been resolved.
///
/// # Errors
/// * `Forbidden` - User is not an admin
pub fn require_admin(user: User) -> Result<User, AuthError> {
    if user.is_admin() {
        Ok(user)
    } else {
        Err(AuthError::Forbidden(PERMISSION_DENIED.to_string()))
    }
}

/// Domain service implementation for authentication flows.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    cache: Arc<CurrentUserCache>,
    notifications: NotificationQueue,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity directory
    /// * `authenticator` - Password hashing and token codec
    /// * `cache` - Current-user cache shared with other services that mutate users
    /// * `notifications` - Queue feeding the email worker
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        cache: Arc<CurrentUserCache>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            repository,
            authenticator,
            cache,
            notifications,
        }
    }

    // bcrypt blocks the thread; run it on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &password_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))
    }

    fn issue_link_token(&self, email: &str) -> Result<String, AuthError> {
        self.authenticator
            .issue_link_token(Claims::for_subject(email))
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Email address carried by a verification or reset token.
    fn email_from_token(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("Rejected emailed token: {}", e);
            AuthError::invalid_or_expired_token()
        })?;

        claims
            .subject()
            .map(str::to_string)
            .ok_or_else(AuthError::invalid_or_expired_token)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand, origin: &str) -> Result<User, AuthError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::Conflict(DUPLICATE_USERNAME.to_string()));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            confirmed: false,
            avatar: None,
            created_at: self.authenticator.clock().now(),
        };

        let created_user = self.repository.create(user).await?;

        match self.issue_link_token(created_user.email.as_str()) {
            Ok(token) => {
                self.notifications.enqueue(Notification::Verification {
                    email: created_user.email.to_string(),
                    username: created_user.username.to_string(),
                    token,
                    origin: origin.to_string(),
                });
                tracing::info!("Verification email queued for '{}'", created_user.username);
            }
            Err(e) => tracing::error!(
                "Could not queue verification email for '{}': {}",
                created_user.username,
                e
            ),
        }

        Ok(created_user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let incorrect = || AuthError::Unauthenticated(INCORRECT_LOGIN.to_string());

        let user = self
            .repository
            .find_by_username(&credentials.username)
            .await?
            .ok_or_else(incorrect)?;

        if !self
            .verify_password(&credentials.password, &user.password_hash)
            .await?
        {
            tracing::info!("Failed login attempt for '{}'", user.username);
            return Err(incorrect());
        }

        if !user.confirmed {
            return Err(AuthError::Unauthenticated(EMAIL_NOT_CONFIRMED.to_string()));
        }

        let access_token = self
            .authenticator
            .issue_access_token(Claims::for_subject(user.username.as_str()), None)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!("User '{}' logged in", user.username);

        Ok(AccessToken::bearer(access_token))
    }

    async fn verify_email(&self, token: &str) -> Result<EmailVerification, AuthError> {
        let email = self.email_from_token(token)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::BadRequest(VERIFICATION_ERROR.to_string()))?;

        if user.confirmed {
            return Ok(EmailVerification::AlreadyVerified);
        }

        self.repository
            .set_confirmed(&user.email)
            .await?
            .ok_or_else(|| AuthError::BadRequest(VERIFICATION_ERROR.to_string()))?;
        self.cache.evict(user.username.as_str()).await;

        tracing::info!("Email address {} verified", user.email);

        Ok(EmailVerification::Verified)
    }

    async fn request_password_reset(&self, email: &str, origin: &str) -> Result<(), AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::NotFound(USER_NOT_FOUND.to_string()))?;

        let token = self.issue_link_token(user.email.as_str())?;
        self.notifications.enqueue(Notification::PasswordReset {
            email: user.email.to_string(),
            token,
            origin: origin.to_string(),
        });

        tracing::info!(
            "Reset password email queued for a user with email address {}",
            user.email
        );

        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let email = self.email_from_token(token)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(AuthError::invalid_or_expired_token)?;

        let password_hash = self.hash_password(new_password).await?;
        self.repository
            .set_password_hash(&user.id, password_hash)
            .await?;
        self.cache.evict(user.username.as_str()).await;

        tracing::info!("Password updated for a user with email {}", user.email);

        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("Rejected session token: {}", e);
            AuthError::invalid_credentials()
        })?;

        let username = claims.subject().ok_or_else(AuthError::invalid_credentials)?;

        self.cache
            .resolve(username, self.repository.as_ref())
            .await?
            .ok_or_else(AuthError::invalid_credentials)
    }
}
