use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::handlers::request_origin;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn password_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let Json(body) = body?;
    let email = EmailAddress::new(body.email).map_err(UserError::from)?;

    state
        .auth_service
        .request_password_reset(email.as_str(), &request_origin(&headers))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Reset password email sent")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    email: String,
}
