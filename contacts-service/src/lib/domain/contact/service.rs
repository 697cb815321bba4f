use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;

use crate::contact::errors::ContactError;
use crate::contact::models::BirthdayWindow;
use crate::contact::models::Contact;
use crate::contact::models::ContactFilter;
use crate::contact::models::ContactId;
use crate::contact::models::ContactQuery;
use crate::contact::models::CreateContactCommand;
use crate::contact::models::UpdateContactCommand;
use crate::contact::ports::ContactRepository;
use crate::contact::ports::ContactServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for contact operations.
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    repository: Arc<CR>,
    clock: Arc<dyn Clock>,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    /// # Arguments
    /// * `repository` - Contact persistence implementation
    /// * `clock` - Source of "today" for birthday windows
    pub fn new(repository: Arc<CR>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn find_owned(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| ContactError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<CR> ContactServicePort for ContactService<CR>
where
    CR: ContactRepository,
{
    async fn list(&self, owner: &UserId, query: ContactQuery) -> Result<Vec<Contact>, ContactError> {
        let today = self.clock.now().date_naive();
        let filter = ContactFilter {
            search: query.search.filter(|search| !search.is_empty()),
            birthdays: query
                .birthdays_within
                .map(|days| BirthdayWindow::starting(today, days)),
            offset: query.offset,
            limit: query.limit,
        };

        self.repository.list(owner, &filter).await
    }

    async fn get(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError> {
        self.find_owned(owner, id).await
    }

    async fn create(
        &self,
        owner: &UserId,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError> {
        if self
            .repository
            .find_by_email(owner, &command.email)
            .await?
            .is_some()
        {
            return Err(ContactError::EmailAlreadyExists(command.email.to_string()));
        }

        let contact = Contact {
            id: ContactId::new(),
            owner_id: *owner,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            birthday: command.birthday,
            created_at: self.clock.now(),
        };

        let created = self.repository.create(contact).await?;
        tracing::info!("Contact {} created for user {}", created.id, owner);

        Ok(created)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError> {
        let mut contact = self.find_owned(owner, id).await?;

        if let Some(email) = command.email {
            if email != contact.email {
                if let Some(other) = self.repository.find_by_email(owner, &email).await? {
                    if other.id != contact.id {
                        return Err(ContactError::EmailAlreadyExists(email.to_string()));
                    }
                }
            }
            contact.email = email;
        }
        if let Some(first_name) = command.first_name {
            contact.first_name = first_name;
        }
        if let Some(last_name) = command.last_name {
            contact.last_name = last_name;
        }
        if let Some(phone) = command.phone {
            contact.phone = phone;
        }
        if let Some(birthday) = command.birthday {
            contact.birthday = birthday;
        }

        self.repository.update(contact).await
    }

    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        self.find_owned(owner, id).await?;
        self.repository.delete(owner, id).await?;

        tracing::info!("Contact {} deleted for user {}", id, owner);

        Ok(())
    }
}
