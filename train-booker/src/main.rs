use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use train_booker::domain::ProfileStore;
use train_booker::search::{SearchConfig, SourceKind, TrainSearch};
use train_booker::source::{DEFAULT_BASE_URL, LiveConfig, SyntheticConfig};
use train_booker::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match search_config_from_env() {
        Ok(config) => config,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let search = match TrainSearch::from_config(config) {
        Ok(search) => search,
        Err(e) => {
            error!(error = %e, "failed to set up train search");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(search, ProfileStore::builtin()));

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = match bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(%bind, error = %e, "invalid BIND_ADDR");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("train booker listening on http://{addr}");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/classes        - Travel classes");
    info!("  GET  /api/trains/search  - Search for trains");
    info!("  GET  /api/profiles       - Saved traveller profiles");
    info!("  POST /api/bookings       - Confirm a booking");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Read search configuration from the environment.
fn search_config_from_env() -> Result<SearchConfig, String> {
    let source: SourceKind = match std::env::var("TRAIN_SOURCE") {
        Ok(value) => value.parse().map_err(|e| format!("TRAIN_SOURCE: {e}"))?,
        Err(_) => SourceKind::default(),
    };

    let mut synthetic = SyntheticConfig::default();
    if let Ok(value) = std::env::var("SYNTHETIC_DELAY_MS") {
        let ms: u64 = value
            .trim()
            .parse()
            .map_err(|e| format!("SYNTHETIC_DELAY_MS: {e}"))?;
        synthetic = synthetic.with_delay(Duration::from_millis(ms));
    }

    let config = match source {
        SourceKind::Synthetic => SearchConfig::synthetic(synthetic),
        SourceKind::Live => {
            let api_key = std::env::var("TRANSIT_API_KEY").unwrap_or_else(|_| {
                warn!("TRANSIT_API_KEY not set. Live searches will fail.");
                String::new()
            });
            let base_url =
                std::env::var("TRANSIT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            SearchConfig::live(LiveConfig::new(api_key).with_base_url(base_url))
                .with_synthetic(synthetic)
        }
        SourceKind::Fixture => {
            let path = std::env::var("TRAIN_FIXTURE_PATH")
                .map_err(|_| "TRAIN_FIXTURE_PATH must be set for the fixture source".to_string())?;
            SearchConfig::fixture(PathBuf::from(path)).with_synthetic(synthetic)
        }
    };

    Ok(config)
}
