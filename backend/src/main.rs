use anyhow::Context;
use tracing_subscriber::EnvFilter;

use clouddocs_web::config::AppConfig;
use clouddocs_web::db::connection;
use clouddocs_web::routes;
use clouddocs_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));
    tracing::info!("Document backend at {}", config.backend.url);

    let db_pool = connection::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    if let Some(dir) = &config.server.static_dir {
        tracing::info!("Serving UI bundle from {dir}");
    }

    let state = AppState::new(config, db_pool).context("Failed to initialise services")?;
    let app = routes::router(state);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
