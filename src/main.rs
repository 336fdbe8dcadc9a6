use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use tourist_map::api::AppState;
use tourist_map::{TourismConfig, catalog, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = TourismConfig::load_from_path(config_path)?;
    telemetry::init(&config.logging)?;

    info!("Starting tourist-map {}", tourist_map::VERSION);
    let attractions = catalog::load_or_empty(&config.server.catalog_path)?;
    let state = AppState::with_catalog(attractions);

    web::run(&config.server, state).await
}
