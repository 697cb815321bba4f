use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::contact::errors::ContactError;
use crate::contact::models::Birthday;
use crate::contact::models::Contact;
use crate::contact::models::ContactFilter;
use crate::contact::models::ContactId;
use crate::contact::models::PersonName;
use crate::contact::models::PhoneNumber;
use crate::contact::ports::ContactRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

const CONTACT_COLUMNS: &str =
    "id, user_id, first_name, last_name, email, phone, birthday, created_at";

const OWNER_EMAIL_CONSTRAINT: &str = "contacts_user_id_email_key";

#[derive(Debug, FromRow)]
struct ContactRow {
    id: Uuid,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birthday: NaiveDate,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Contact {
            id: ContactId(row.id),
            owner_id: UserId(row.user_id),
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            email: EmailAddress::new(row.email)?,
            phone: PhoneNumber::new(row.phone)?,
            birthday: Birthday::from(row.birthday),
            created_at: row.created_at,
        })
    }
}

fn write_error(e: sqlx::Error, contact: &Contact) -> ContactError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(OWNER_EMAIL_CONSTRAINT) {
            return ContactError::EmailAlreadyExists(contact.email.to_string());
        }
    }
    ContactError::DatabaseError(e.to_string())
}

fn database_error(e: sqlx::Error) -> ContactError {
    ContactError::DatabaseError(e.to_string())
}

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn list(
        &self,
        owner: &UserId,
        filter: &ContactFilter,
    ) -> Result<Vec<Contact>, ContactError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM contacts WHERE user_id = ",
            CONTACT_COLUMNS
        ));
        query.push_bind(owner.0);

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query
                .push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(window) = filter.birthdays.as_ref().filter(|w| !w.is_whole_year()) {
            let joiner = if window.wraps_year_end() { " OR " } else { " AND " };
            query
                .push(" AND (to_char(birthday, 'MM-DD') >= ")
                .push_bind(window.start_key())
                .push(joiner)
                .push("to_char(birthday, 'MM-DD') <= ")
                .push_bind(window.end_key())
                .push(")");
        }

        query.push(" ORDER BY created_at, id");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }
        if let Some(offset) = filter.offset {
            query.push(" OFFSET ").push_bind(i64::from(offset));
        }

        query
            .build_query_as::<ContactRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Contact::try_from)
            .collect()
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactError> {
        let query = format!(
            "SELECT {} FROM contacts WHERE id = $1 AND user_id = $2",
            CONTACT_COLUMNS
        );

        sqlx::query_as::<_, ContactRow>(&query)
            .bind(id.0)
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Contact::try_from)
            .transpose()
    }

    async fn find_by_email(
        &self,
        owner: &UserId,
        email: &EmailAddress,
    ) -> Result<Option<Contact>, ContactError> {
        let query = format!(
            "SELECT {} FROM contacts WHERE email = $1 AND user_id = $2",
            CONTACT_COLUMNS
        );

        sqlx::query_as::<_, ContactRow>(&query)
            .bind(email.as_str())
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Contact::try_from)
            .transpose()
    }

    async fn create(&self, contact: Contact) -> Result<Contact, ContactError> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, user_id, first_name, last_name, email, phone, birthday, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contact.id.0)
        .bind(contact.owner_id.0)
        .bind(contact.first_name.as_str())
        .bind(contact.last_name.as_str())
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(contact.birthday.date())
        .bind(contact.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &contact))?;

        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = $3, last_name = $4, email = $5, phone = $6, birthday = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(contact.id.0)
        .bind(contact.owner_id.0)
        .bind(contact.first_name.as_str())
        .bind(contact.last_name.as_str())
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(contact.birthday.date())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &contact))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(contact.id.to_string()));
        }

        Ok(contact)
    }

    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
