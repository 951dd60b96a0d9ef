use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Pool that only opens connections on first use. The database is owned by the
/// cloud backend, so startup does not fail when it is briefly unreachable.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)
        .context("Invalid database URL")
}
