use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::health::HealthCheck;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

pub async fn healthchecker(
    State(state): State<AppState>,
) -> Result<ApiSuccess<MessageData>, Response> {
    state.health.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorData {
                detail: "Error connecting to the database".to_string(),
            }),
        )
            .into_response()
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Welcome to REST API"),
    ))
}
