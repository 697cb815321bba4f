use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::cache::CurrentUserCache;
use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::AvatarStorage;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    repository: Arc<UR>,
    avatar_storage: Arc<AS>,
    cache: Arc<CurrentUserCache>,
}

impl<UR, AS> UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `avatar_storage` - Where uploaded avatars are written
    /// * `cache` - Current-user cache to evict after changes
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, avatar_storage: Arc<AS>, cache: Arc<CurrentUserCache>) -> Self {
        Self {
            repository,
            avatar_storage,
            cache,
        }
    }
}

#[async_trait]
impl<UR, AS> UserServicePort for UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    async fn update_avatar(&self, user: &User, upload: AvatarUpload) -> Result<User, UserError> {
        let url = self.avatar_storage.store(&user.username, &upload).await?;

        let updated_user = self
            .repository
            .set_avatar(&user.email, url)
            .await?
            .ok_or_else(|| UserError::NotFound(user.email.to_string()))?;

        self.cache.evict(user.username.as_str()).await;

        tracing::info!("Avatar updated for user '{}'", updated_user.username);

        Ok(updated_user)
    }
}
