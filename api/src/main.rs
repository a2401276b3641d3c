use actix_web::{web, HttpServer};
use tracing::info;

use sn_api::telemetry::init_tracing;
use sn_api::{create_app, AppState};
use sn_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        "Starting social network API server"
    );

    let state = web::Data::new(AppState::from_config(&config).await?);
    let cors = config.cors.clone();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    info!("Server stopped");
    Ok(())
}
