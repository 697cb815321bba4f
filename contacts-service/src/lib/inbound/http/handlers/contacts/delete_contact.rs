use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::contact::errors::ContactError;
use crate::contact::models::ContactId;
use crate::contact::ports::ContactServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let contact_id = ContactId::from_string(&contact_id).map_err(ContactError::from)?;

    state
        .contact_service
        .delete(&user.id, &contact_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
