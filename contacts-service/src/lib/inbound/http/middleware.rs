use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::require_admin as admin_gate;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the resolved account of the request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the bearer token to the current user and adds it to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let user = state.auth_service.current_user(token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Middleware that only lets admins through. Must run after `authenticate`.
pub async fn require_admin(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let CurrentUser(user) = req
        .extensions_mut()
        .remove::<CurrentUser>()
        .ok_or_else(AuthError::invalid_credentials)?;

    let user = admin_gate(user)?;
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(AuthError::invalid_credentials)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::invalid_credentials())?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::invalid_credentials()),
    }
}
