use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::contact::models::ContactQuery;
use crate::contact::ports::ContactServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ContactData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    params: Result<Query<ListContactsParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    let Query(params) = params?;

    let contacts = state
        .contact_service
        .list(&user.id, params.into())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        contacts.iter().map(ContactData::from).collect(),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListContactsParams {
    search: Option<String>,
    birthdays_within: Option<u32>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl From<ListContactsParams> for ContactQuery {
    fn from(params: ListContactsParams) -> Self {
        Self {
            search: params.search,
            birthdays_within: params.birthdays_within,
            offset: params.offset,
            limit: params.limit,
        }
    }
}
