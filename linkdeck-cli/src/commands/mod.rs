//! Command implementations for the linkdeck CLI

pub mod config;
pub mod migrate;
pub mod serve;

pub use config::run_config;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{anyhow, Context, Result};
use linkdeck_core::LinkdeckConfig;
use linkdeck_server::db::{create_pool_with_options, PgCatalog};
use linkdeck_server::models::CategoryName;

/// Validate the configured seed list into category names
pub(crate) fn seed_categories(config: &LinkdeckConfig) -> Result<Vec<CategoryName>> {
    config
        .catalog
        .seed_names()
        .iter()
        .map(|name| {
            CategoryName::new(name).map_err(|e| anyhow!("invalid seed category '{}': {}", name, e))
        })
        .collect()
}

/// Connect to PostgreSQL and bring the schema up to date
pub(crate) async fn connect_catalog(
    config: &LinkdeckConfig,
    database_url: Option<String>,
) -> Result<PgCatalog> {
    let url = database_url.unwrap_or_else(|| config.database.connection_url());

    let pool = create_pool_with_options(&url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    let catalog = PgCatalog::new(pool);
    catalog.migrate().await.context("Failed to run migrations")?;
    Ok(catalog)
}
