use async_trait::async_trait;

use crate::contact::errors::ContactError;
use crate::contact::models::Contact;
use crate::contact::models::ContactFilter;
use crate::contact::models::ContactId;
use crate::contact::models::ContactQuery;
use crate::contact::models::CreateContactCommand;
use crate::contact::models::UpdateContactCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for contact operations on behalf of one owner.
///
/// Every operation is scoped to `owner`; contacts of other users behave as
/// if they did not exist.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// List the owner's contacts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, owner: &UserId, query: ContactQuery) -> Result<Vec<Contact>, ContactError>;

    /// # Errors
    /// * `NotFound` - No such contact for this owner
    async fn get(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError>;

    /// Create a contact.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Owner already has a contact with this email
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        owner: &UserId,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - No such contact for this owner
    /// * `EmailAlreadyExists` - Another of the owner's contacts has the new email
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        owner: &UserId,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// # Errors
    /// * `NotFound` - No such contact for this owner
    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError>;
}

/// Persistence operations for contacts.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Contacts of `owner` matching `filter`, oldest first, paged by offset/limit.
    async fn list(&self, owner: &UserId, filter: &ContactFilter)
        -> Result<Vec<Contact>, ContactError>;

    async fn find_by_id(&self, owner: &UserId, id: &ContactId)
        -> Result<Option<Contact>, ContactError>;

    async fn find_by_email(
        &self,
        owner: &UserId,
        email: &EmailAddress,
    ) -> Result<Option<Contact>, ContactError>;

    /// # Errors
    /// * `EmailAlreadyExists` - Unique (owner, email) violated
    async fn create(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `EmailAlreadyExists` - Unique (owner, email) violated
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// # Errors
    /// * `NotFound` - Contact does not exist
    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError>;
}
