use async_trait::async_trait;

use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Replace the avatar of an account.
    ///
    /// # Arguments
    /// * `user` - Account whose avatar changes (already authorized)
    /// * `upload` - Validated image
    ///
    /// # Returns
    /// User entity carrying the new avatar URL
    ///
    /// # Errors
    /// * `NotFound` - Account disappeared since it was resolved
    /// * `StorageError` - Avatar could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn update_avatar(&self, user: &User, upload: AvatarUpload) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate (the identity directory).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// Takes the raw string because login and token subjects are unvalidated input.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Mark the account with this email as confirmed.
    ///
    /// # Returns
    /// Updated user entity, None if no account has this email
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_confirmed(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Overwrite the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_password_hash(&self, id: &UserId, password_hash: String)
        -> Result<User, UserError>;

    /// Set the avatar URL of the account with this email.
    ///
    /// # Returns
    /// Updated user entity, None if no account has this email
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_avatar(&self, email: &EmailAddress, url: String)
        -> Result<Option<User>, UserError>;
}

/// Storage for uploaded avatar images.
#[async_trait]
pub trait AvatarStorage: Send + Sync + 'static {
    /// Store an avatar for the given account and return its public URL.
    ///
    /// Storing again for the same username replaces the previous image.
    ///
    /// # Errors
    /// * `StorageError` - Image could not be written
    async fn store(&self, username: &Username, upload: &AvatarUpload) -> Result<String, UserError>;
}
