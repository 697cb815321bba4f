use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;

use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AvatarStorage;
use crate::user::errors::UserError;

/// Avatar storage writing `{username}.{ext}` files into a local directory
/// that the HTTP layer serves under `public_base_url`.
pub struct LocalAvatarStorage {
    directory: PathBuf,
    public_base_url: String,
    clock: Arc<dyn Clock>,
}

impl LocalAvatarStorage {
    pub fn new(
        directory: impl Into<PathBuf>,
        public_base_url: &str,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory: directory.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            clock,
        }
    }
}

#[async_trait]
impl AvatarStorage for LocalAvatarStorage {
    async fn store(&self, username: &Username, upload: &AvatarUpload) -> Result<String, UserError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;

        let file_name = format!("{}.{}", username.as_str(), upload.extension());
        tokio::fs::write(self.directory.join(&file_name), upload.bytes())
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;

        tracing::debug!(file = %file_name, size = upload.bytes().len(), "Avatar written");

        // `v` changes on every upload of the same file.
        Ok(format!(
            "{}/{}?v={}",
            self.public_base_url,
            file_name,
            self.clock.now().timestamp()
        ))
    }
}
