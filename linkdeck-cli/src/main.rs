//! linkdeck CLI - bookmark catalog server and maintenance commands
//!
//! - `serve`: run the HTTP API (PostgreSQL or in-memory)
//! - `migrate`: create tables and seed categories, then exit
//! - `config`: inspect the effective configuration

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::config::ConfigArgs;
use commands::migrate::MigrateArgs;
use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(
    name = "linkdeck",
    author,
    version,
    about = "Bookmark catalog with categories and visit counts",
    long_about = "Serve a small JSON API for saving links into categories, \
                  listing them by popularity and counting visits."
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Apply the database schema and seed categories
    Migrate(MigrateArgs),
    /// Show configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values count as process environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::Config(args) => commands::run_config(args),
    };

    tracing_setup::shutdown_otel();
    result
}
