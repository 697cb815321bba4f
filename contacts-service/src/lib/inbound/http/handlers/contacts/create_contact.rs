use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::contact::errors::ContactError;
use crate::contact::models::Birthday;
use crate::contact::models::CreateContactCommand;
use crate::contact::models::PersonName;
use crate::contact::models::PhoneNumber;
use crate::contact::ports::ContactServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    body: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    let Json(body) = body?;

    state
        .contact_service
        .create(&user.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::CREATED, contact.into()))
}

/// HTTP request body for creating a contact (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateContactRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birthday: String,
}

impl CreateContactRequest {
    fn try_into_command(self) -> Result<CreateContactCommand, ContactError> {
        // Checked before the other fields.
        let birthday = Birthday::parse(&self.birthday)?;
        Ok(CreateContactCommand {
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            email: EmailAddress::new(self.email)?,
            phone: PhoneNumber::new(self.phone)?,
            birthday,
        })
    }
}
