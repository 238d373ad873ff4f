use crate::{SharedData, api, logging};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

/// Assembles the complete application router: the todo API under /api, the health
/// endpoints, the OpenAPI documentation, and the bundled static frontend at the root.
pub fn build_router(shared_data: Arc<SharedData>) -> Router {
    let application_routes = Router::new()
        .nest("/api", api::todo::todo_routes())
        .merge(api::health::health_routes())
        .merge(api::swagger_main::build_documentation())
        .route_service("/", ServeFile::new("static/index.html"))
        .with_state(shared_data)
        .layer(CorsLayer::permissive());

    logging::attach_tracing_http(application_routes)
}
