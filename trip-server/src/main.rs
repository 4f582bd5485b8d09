use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::live::{CachedLiveProvider, LiveCacheConfig, TravelpayoutsClient, TravelpayoutsConfig};
use trip_server::planner::OptimizerConfig;
use trip_server::reference::InMemoryReference;
use trip_server::web::{AppState, create_router};

const DEFAULT_DATA_PATH: &str = "data/reference.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Read a whole number of seconds from the environment.
fn env_secs(name: &str) -> Result<Option<Duration>, Box<dyn Error>> {
    match std::env::var(name) {
        Ok(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|e| format!("{name} must be a number of seconds: {e}"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_path = std::env::var("TRIP_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    let reference = InMemoryReference::load(&data_path)?;
    info!(path = %data_path, cities = reference.city_count(), "loaded reference data");

    let token = std::env::var("TRAVELPAYOUTS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    if token.is_none() {
        warn!("TRAVELPAYOUTS_TOKEN not set, live prices disabled");
    }

    let mut config = OptimizerConfig::default().with_live_prices(token.is_some());
    if let Some(deadline) = env_secs("TRIP_SEARCH_DEADLINE_SECS")? {
        config = config.with_search_deadline(deadline);
    }
    if let Some(timeout) = env_secs("TRIP_LIVE_TIMEOUT_SECS")? {
        config = config.with_live_timeout(timeout);
    }

    let client_config = TravelpayoutsConfig {
        token,
        ..TravelpayoutsConfig::default()
    }
    .with_timeout(config.live_timeout);
    let client = TravelpayoutsClient::new(client_config)?;
    let live = CachedLiveProvider::new(client, &LiveCacheConfig::default());

    let state = AppState::new(reference, live, config);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("TRIP_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    info!(%addr, "trip planner listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/cities/search  - Search cities");
    info!("  GET  /api/cities/hubs    - List transit hubs");
    info!("  POST /trips/plan         - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
