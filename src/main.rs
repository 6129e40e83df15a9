//! agrosense - agricultural diagnostics backend
//!
//! Exposes a rule-based soil nutrient analyzer plus thin proxies to an
//! OpenWeatherMap forecast upstream and a Plant.id identification
//! upstream, with an embedded single-page front end.

use anyhow::Result;
use tracing::info;

use agrosense::config::Config;
use agrosense::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting AgroSense backend v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = Config::from_env()?;
    if config.weather_api_key.is_none() {
        info!("WEATHER_API_KEY not set; /api/weather is disabled");
    }
    if config.disease_api_key.is_none() {
        info!("DISEASE_API_KEY not set; /api/disease is disabled");
    }

    let state = AppState::new(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("agrosense listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
