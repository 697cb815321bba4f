use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::contact::errors::ContactError;
use crate::contact::models::Birthday;
use crate::contact::models::ContactId;
use crate::contact::models::PersonName;
use crate::contact::models::PhoneNumber;
use crate::contact::models::UpdateContactCommand;
use crate::contact::ports::ContactServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn update_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
    body: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    let contact_id = ContactId::from_string(&contact_id).map_err(ContactError::from)?;
    let Json(body) = body?;

    state
        .contact_service
        .update(&user.id, &contact_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}

/// HTTP request body for a partial contact update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateContactRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    birthday: Option<String>,
}

impl UpdateContactRequest {
    fn try_into_command(self) -> Result<UpdateContactCommand, ContactError> {
        let birthday = self.birthday.as_deref().map(Birthday::parse).transpose()?;
        Ok(UpdateContactCommand {
            first_name: self.first_name.map(PersonName::new).transpose()?,
            last_name: self.last_name.map(PersonName::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            birthday,
        })
    }
}
