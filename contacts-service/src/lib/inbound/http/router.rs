use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::Uri;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::password_reset;
use super::handlers::auth::password_reset_confirm;
use super::handlers::auth::register;
use super::handlers::auth::verify_email;
use super::handlers::contacts::create_contact;
use super::handlers::contacts::delete_contact;
use super::handlers::contacts::get_contact;
use super::handlers::contacts::list_contacts;
use super::handlers::contacts::update_contact;
use super::handlers::health::healthchecker;
use super::handlers::users::me;
use super::handlers::users::update_avatar;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::contact::ports::ContactServicePort;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::health::HealthCheck;
use crate::user::ports::UserServicePort;

/// `/api/users/me` allows a burst of 10 per client address, refilling one
/// request every 6 seconds.
const ME_RATE_LIMIT_BURST: u32 = 10;
const ME_RATE_LIMIT_PERIOD: Duration = Duration::from_secs(6);

/// Paths whose trailing segment is a credential.
const SECRET_PATH_PREFIXES: &[&str] = &["/api/auth/verify_email/"];

/// Request path as written to the logs: no query string, and credential
/// segments replaced.
fn loggable_path(uri: &Uri) -> Cow<'_, str> {
    let path = uri.path();
    SECRET_PATH_PREFIXES
        .iter()
        .find(|prefix| path.len() > prefix.len() && path.starts_with(*prefix))
        .map_or(Cow::Borrowed(path), |prefix| {
            Cow::Owned(format!("{}:token", prefix))
        })
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub contact_service: Arc<dyn ContactServicePort>,
    pub health: Arc<dyn HealthCheck>,
}

/// Build the HTTP API.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()`: the
/// `/api/users/me` rate limit is keyed on the peer address.
///
/// # Arguments
/// * `avatar_dir` - Directory served under `/avatars`
pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    contact_service: Arc<dyn ContactServicePort>,
    health: Arc<dyn HealthCheck>,
    avatar_dir: &Path,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        contact_service,
        health,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify_email/:token", get(verify_email))
        .route("/api/auth/password-reset/", post(password_reset))
        .route(
            "/api/auth/password-reset-confirm/",
            post(password_reset_confirm),
        )
        .route("/api/healthchecker/", get(healthchecker));

    let admin_routes = Router::new()
        .route("/api/users/avatar", patch(update_avatar))
        .route_layer(middleware::from_fn(require_admin));

    let me_routes = Router::new().route("/api/users/me", get(me));
    let me_routes = match GovernorConfigBuilder::default()
        .period(ME_RATE_LIMIT_PERIOD)
        .burst_size(ME_RATE_LIMIT_BURST)
        .finish()
    {
        Some(config) => me_routes.route_layer(GovernorLayer {
            config: Arc::new(config),
        }),
        None => {
            tracing::warn!("Invalid rate limit for /api/users/me, serving it unlimited");
            me_routes
        }
    };

    let protected_routes = Router::new()
        .merge(me_routes)
        .route("/api/contacts/", get(list_contacts).post(create_contact))
        .route(
            "/api/contacts/:contact_id",
            get(get_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %loggable_path(request.uri()),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %loggable_path(request.uri()),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/avatars", ServeDir::new(avatar_dir))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
