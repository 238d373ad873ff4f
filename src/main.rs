use axum::extract::State;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod api;
mod app_env;
mod db;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routes;
mod routing_utils;

#[cfg(test)]
mod integration_test;

/// Application state shared across every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub environment: String,
}

/// Extractor alias for the application state attached to the router
pub type AppState = State<Arc<SharedData>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::setup_logging(logging::init_env_filter());

    let config = app_env::AppConfig::from_env()?;

    let db_pool = db::connect_sqlite(&config.database_path).await?;
    db::init_schema(&db_pool).await?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
        environment: config.environment.clone(),
    });
    let app = routes::build_router(shared_data);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(
        "Starting server on port {} in the {} environment.",
        config.port, config.environment
    );
    axum::serve(listener, app).await?;

    Ok(())
}
