use crate::routing_utils::Json;
use crate::{AppState, SharedData, dto};
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(health_check))]
/// Defines the OpenAPI documentation for the health API
pub struct HealthApi;
/// Constant used to group health endpoints in OpenAPI documentation
pub const HEALTH_API_GROUP: &str = "Health";

/// Adds the liveness routes to the application router. Both the bare path and its
/// trailing-slash twin are registered because axum matches them separately.
pub fn health_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/", get(health_check))
}

/// Reports service liveness and the environment the service is running in. Never
/// touches storage, so it responds healthy even while the database is broken.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_API_GROUP,
    responses(
        (status = 200, description = "The service is alive", body = dto::Health),
    ),
)]
async fn health_check(State(app_state): AppState) -> Json<dto::Health> {
    Json(dto::Health {
        status: "healthy".to_owned(),
        environment: app_state.environment.clone(),
    })
}
