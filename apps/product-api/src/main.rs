//! Product API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{self, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.url());

    let db = postgres::connect_from_config_with_retry(config.database.clone(), None).await?;

    run_migrations::<Migrator>(&db, "product_api").await?;

    // Build the REST router
    let api_routes = api::routes(&db);
    let app = create_router::<openapi::ApiDoc>(api_routes).await?;

    info!("Starting Product API on {}", config.server.address());

    // Run the server with graceful shutdown, closing the connection pool
    // during the shutdown window
    let db_for_cleanup = db.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL connections");
        if let Err(e) = db_for_cleanup.close().await {
            tracing::warn!("Failed to close database connection cleanly: {}", e);
        }
    })
    .await?;

    info!("Product API shutdown complete");
    Ok(())
}
