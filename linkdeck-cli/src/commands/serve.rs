//! HTTP server command for the linkdeck API

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use linkdeck_core::LinkdeckConfig;
use linkdeck_server::http::{run_server, ServerConfig};
use linkdeck_server::{CatalogStore, MemoryCatalog};

use super::{connect_catalog, seed_categories};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: server.host/server.port from config, 0.0.0.0:8092)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep the catalog in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = LinkdeckConfig::load().context("Failed to load configuration")?;
    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => resolve_bind(&config)?,
    };
    let seeds = seed_categories(&config)?;

    let store: Arc<dyn CatalogStore> = if args.memory {
        if args.database_url.is_some() {
            tracing::warn!("--memory set, ignoring database url");
        }
        tracing::warn!("Using in-memory catalog, nothing will be persisted");
        Arc::new(MemoryCatalog::new())
    } else {
        Arc::new(connect_catalog(&config, args.database_url).await?)
    };

    tracing::info!("Starting linkdeck server on {}", bind_addr);

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
        seed_categories: seeds,
    };

    // Blocks until shutdown
    run_server(store, server_config).await.context("Server error")?;

    Ok(())
}

fn resolve_bind(config: &LinkdeckConfig) -> Result<SocketAddr> {
    let host = config.server.host.as_str();
    let port = config.server.port;
    (host, port)
        .to_socket_addrs()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?
        .next()
        .with_context(|| format!("No address found for {}:{}", host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_from_config() {
        let mut config = LinkdeckConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 9100;
        assert_eq!(resolve_bind(&config).unwrap(), SocketAddr::from(([127, 0, 0, 1], 9100)));
    }

    #[test]
    fn default_bind_is_all_interfaces() {
        let addr = resolve_bind(&LinkdeckConfig::default()).unwrap();
        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 8092)));
    }
}
