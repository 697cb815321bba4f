use std::collections::HashMap;
use std::sync::Arc;

use auth::Clock;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

struct CacheEntry {
    user: User,
    expires_at: DateTime<Utc>,
}

/// Process-wide memo of resolved current users, keyed by username.
///
/// Only found users are stored. Entries expire after the configured TTL and
/// are evicted explicitly whenever the account changes. Concurrent misses for
/// the same username may both hit the directory; the last write wins.
pub struct CurrentUserCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CurrentUserCache {
    pub const DEFAULT_TTL_SECONDS: i64 = 180;

    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Resolve a username to a user, consulting the directory on a miss.
    ///
    /// # Arguments
    /// * `username` - Subject of a validated session token
    /// * `repository` - Directory queried on a miss or after expiry
    ///
    /// # Returns
    /// The cached or freshly loaded user, None if the directory has no such user
    ///
    /// # Errors
    /// * `DatabaseError` - Directory lookup failed (nothing is cached)
    pub async fn resolve<UR>(
        &self,
        username: &str,
        repository: &UR,
    ) -> Result<Option<User>, UserError>
    where
        UR: UserRepository + ?Sized,
    {
        if let Some(user) = self.lookup(username).await {
            tracing::debug!("Current user '{}' served from cache", username);
            return Ok(Some(user));
        }

        tracing::info!("Search '{}' in database", username);
        let found = repository.find_by_username(username).await?;

        if let Some(user) = &found {
            let now = self.clock.now();
            let mut entries = self.entries.write().await;
            entries.retain(|_, entry| entry.expires_at > now);
            entries.insert(
                username.to_string(),
                CacheEntry {
                    user: user.clone(),
                    expires_at: now + self.ttl,
                },
            );
        }

        Ok(found)
    }

    /// Drop the cached snapshot for a username, if any.
    pub async fn evict(&self, username: &str) {
        if self.entries.write().await.remove(username).is_some() {
            tracing::debug!("Evicted cached user '{}'", username);
        }
    }

    async fn lookup(&self, username: &str) -> Option<User> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(username)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.user.clone())
    }
}
