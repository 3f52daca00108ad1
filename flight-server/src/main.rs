use std::net::SocketAddr;

use flight_server::config::AppConfig;
use flight_server::web::{API_BASE_PATH, AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Outside the dev
/// environment events are written as JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_dev() {
        builder.init();
    } else {
        builder.json().init();
    }
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    info!(
        environment = %config.environment,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        max_states = config.search.max_states,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Unable to bind listener");
            std::process::exit(1);
        }
    };

    info!(%addr, "Lazy traveler listening");
    info!("  GET  /health");
    info!("  POST {API_BASE_PATH}/lazy_jack");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
