//! Schema migration and category seeding without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use linkdeck_core::LinkdeckConfig;
use linkdeck_server::CatalogStore;

use super::{connect_catalog, seed_categories};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Only create tables, skip category seeding
    #[arg(long)]
    pub no_seed: bool,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = LinkdeckConfig::load().context("Failed to load configuration")?;
    let seeds = seed_categories(&config)?;

    let catalog = connect_catalog(&config, args.database_url).await?;
    println!("✅ Schema up to date");

    if args.no_seed {
        return Ok(());
    }

    let inserted = catalog
        .seed_categories(&seeds)
        .await
        .context("Failed to seed categories")?;
    tracing::info!(configured = seeds.len(), inserted, "categories seeded");
    println!("✅ {} of {} categories newly seeded", inserted, seeds.len());

    Ok(())
}
