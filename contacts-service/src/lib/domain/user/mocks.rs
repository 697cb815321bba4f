use async_trait::async_trait;
use mockall::mock;

use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AvatarStorage;
use crate::user::ports::UserRepository;

// Shared by the user, auth and cache test modules.
mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: User) -> Result<User, UserError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        async fn set_confirmed(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        async fn set_password_hash(&self, id: &UserId, password_hash: String) -> Result<User, UserError>;
        async fn set_avatar(&self, email: &EmailAddress, url: String) -> Result<Option<User>, UserError>;
    }
}

mock! {
    pub TestAvatarStorage {}

    #[async_trait]
    impl AvatarStorage for TestAvatarStorage {
        async fn store(&self, username: &Username, upload: &AvatarUpload) -> Result<String, UserError>;
    }
}

/// Build a user fixture with the given identity.
pub fn user_fixture(username: &str, email: &str) -> User {
    User {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$2b$04$invalidfixturehash".to_string(),
        role: Default::default(),
        confirmed: true,
        avatar: None,
        created_at: chrono::Utc::now(),
    }
}
